//! Single-rule matching against POSIX relative paths.
//!
//! Ignore rules use gitignore syntax and are compiled with the `ignore`
//! crate's gitignore matcher. Include rules follow the simpler export-include
//! conventions: quoted literals, directory subtrees, and basename globs.

use globset::{GlobBuilder, GlobMatcher};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::utils::{file_name, normalize_path, relative_posix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Ignore,
    Include,
}

/// Where a rule came from. Later sources take precedence for ignore rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    BuiltinDefault,
    GlobalConfig,
    ProjectFile(PathBuf),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::BuiltinDefault => write!(f, "built-in defaults"),
            Provenance::GlobalConfig => write!(f, "global configuration"),
            Provenance::ProjectFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One parsed rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    kind: RuleKind,
    negated: bool,
    provenance: Provenance,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Gitignore-syntax body (without any `!`).
    Gitignore(Gitignore),
    /// `"name"`: the exact relative path or the exact basename.
    Literal(String),
    /// `dir`, `dir/`, `dir/**`: the path itself and everything beneath it.
    Subtree(String),
    /// Include glob; matched against the basename when it has no `/`.
    Glob { matcher: GlobMatcher, basename: bool },
    /// Absolute path outside the project root; never matches here.
    Outside,
}

impl Pattern {
    /// Parse one line of an ignore-rule source.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn ignore(line: &str, provenance: Provenance) -> Result<Option<Self>> {
        let Some(text) = rule_text(line) else {
            return Ok(None);
        };

        let (negated, body) = match text.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };
        if body.is_empty() {
            return Err(invalid(text, &provenance, "negation without a pattern"));
        }

        let matcher = if let Some(literal) = unquote(body) {
            Matcher::Literal(literal.trim_start_matches('/').to_string())
        } else {
            // `dir/**` covers the directory itself too, so the walk can prune it.
            let body = match body.strip_suffix("/**") {
                Some(dir) if !dir.is_empty() => format!("{dir}/"),
                _ => body.to_string(),
            };
            let mut builder = GitignoreBuilder::new(".");
            builder
                .add_line(None, &body)
                .map_err(|e| invalid(text, &provenance, &e.to_string()))?;
            Matcher::Gitignore(
                builder.build().map_err(|e| invalid(text, &provenance, &e.to_string()))?,
            )
        };

        Ok(Some(Self {
            raw: text.to_string(),
            kind: RuleKind::Ignore,
            negated,
            provenance,
            matcher,
        }))
    }

    /// Parse one line of an include-rule source.
    ///
    /// `root` resolves absolute quoted paths. Returns `Ok(None)` for blank
    /// lines and `#` comments.
    pub fn include(line: &str, provenance: Provenance, root: &Path) -> Result<Option<Self>> {
        let Some(text) = rule_text(line) else {
            return Ok(None);
        };

        if text.starts_with('!') {
            return Err(invalid(text, &provenance, "negation is not supported in include rules"));
        }

        let matcher = if let Some(literal) = unquote(text) {
            let literal_path = Path::new(literal);
            if literal_path.is_absolute() {
                match relative_posix(root, literal_path) {
                    Some(rel) => Matcher::Literal(rel),
                    None => {
                        tracing::debug!(
                            "Include rule {} from {} points outside {}; it matches nothing",
                            text,
                            provenance,
                            root.display()
                        );
                        Matcher::Outside
                    }
                }
            } else {
                Matcher::Literal(normalize_path(literal))
            }
        } else {
            let mut body = normalize_path(text.trim_start_matches('/'));
            if body.ends_with('/') {
                body.push_str("**");
            }
            compile_include(&body, text, &provenance)?
        };

        Ok(Some(Self {
            raw: text.to_string(),
            kind: RuleKind::Include,
            negated: false,
            provenance,
            matcher,
        }))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// True for an absolute include path outside the project root.
    pub fn is_outside_root(&self) -> bool {
        matches!(self.matcher, Matcher::Outside)
    }

    /// Does this rule match `relative_path`?
    ///
    /// Negation is not applied here; it is the rule set's job to interpret
    /// a negated match. Ignore rules also match through any ancestor
    /// directory, so `build/` matches `build/out/app.js`.
    pub fn matches(&self, relative_path: &str, is_dir: bool) -> bool {
        let path = normalize_path(relative_path);
        let path = path.trim_start_matches("./").trim_matches('/');
        if path.is_empty() {
            return false;
        }

        match (&self.matcher, self.kind) {
            (Matcher::Gitignore(gi), _) => {
                gi.matched_path_or_any_parents(path, is_dir).is_ignore()
            }
            (_, RuleKind::Ignore) => {
                self.matches_one(path) || ancestors(path).any(|dir| self.matches_one(dir))
            }
            (_, RuleKind::Include) => self.matches_one(path),
        }
    }

    fn matches_one(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Gitignore(gi) => gi.matched(path, false).is_ignore(),
            Matcher::Literal(literal) => path == literal || file_name(path) == literal,
            Matcher::Subtree(dir) => {
                path == dir
                    || (path.starts_with(dir.as_str()) && path[dir.len()..].starts_with('/'))
            }
            Matcher::Glob { matcher, basename } => {
                if *basename {
                    matcher.is_match(file_name(path))
                } else {
                    matcher.is_match(path)
                }
            }
            Matcher::Outside => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.raw, self.provenance)
    }
}

fn compile_include(body: &str, raw: &str, provenance: &Provenance) -> Result<Matcher> {
    if let Some(dir) = body.strip_suffix("/**") {
        if !dir.is_empty() && !has_glob_meta(dir) {
            return Ok(Matcher::Subtree(dir.to_string()));
        }
    }

    if !has_glob_meta(body) {
        return Ok(Matcher::Subtree(body.to_string()));
    }

    let glob = GlobBuilder::new(body)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|e| invalid(raw, provenance, &e.to_string()))?;
    Ok(Matcher::Glob { matcher: glob.compile_matcher(), basename: !body.contains('/') })
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Trimmed rule text, or `None` for blank lines and comments.
fn rule_text(line: &str) -> Option<&str> {
    let text = line.trim();
    if text.is_empty() || text.starts_with('#') {
        None
    } else {
        Some(text)
    }
}

fn unquote(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Proper ancestors of a relative path, nearest first.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').rev().map(move |(idx, _)| &path[..idx])
}

fn invalid(pattern: &str, provenance: &Provenance, message: &str) -> ExportError {
    ExportError::InvalidPattern {
        pattern: pattern.to_string(),
        source_name: provenance.to_string(),
        message: message.to_string(),
    }
}
