//! Always-applied ignore rules.

/// Version control, dependency, build output, and editor directories plus
/// packaged extension archives. Added first so project rules can negate them.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    "node_modules/",
    ".vscode/",
    ".idea/",
    "dist/",
    "out/",
    "target/",
    "*.vsix",
];
