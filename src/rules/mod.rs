//! Ignore/include rule parsing, matching, and layering.

pub mod defaults;
pub mod pattern;
pub mod ruleset;
pub mod scaffold;

pub use defaults::DEFAULT_IGNORE_PATTERNS;
pub use pattern::{Pattern, Provenance, RuleKind};
pub use ruleset::{RuleSet, RuleSetBuilder, RuleSources};
pub use scaffold::{
    gitignore_seed, split_patterns, write_rule_file, RuleFileKind, ScaffoldMode, ScaffoldOutcome,
};
