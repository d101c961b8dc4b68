//! Directory walk producing the structure tree and the export file list.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cancel::CancellationToken;
use crate::domain::{PathEntry, DEFAULT_LARGE_TREE_THRESHOLD};
use crate::error::{ExportError, Result};
use crate::select::SelectionEngine;
use crate::utils::natural_cmp;

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Visited entries after which the user must confirm continuing.
    pub large_tree_threshold: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { large_tree_threshold: DEFAULT_LARGE_TREE_THRESHOLD }
    }
}

/// Result of one walk. Discard it if the walk was cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutput {
    /// Indented structure lines, directories suffixed with `/`.
    pub tree_lines: Vec<String>,
    /// Files eligible for export, in walk order.
    pub files_to_process: Vec<PathEntry>,
    /// Every visible entry, in walk order.
    pub entries: Vec<PathEntry>,
    /// Subdirectories that could not be listed.
    pub warnings: Vec<String>,
}

/// Depth-first walk of `root`.
///
/// Directories come before files; names within a kind use natural,
/// case-insensitive order. Invisible directories are pruned without being
/// listed. Visibility never prompts, so the engine's answers are untouched.
pub fn walk(
    root: &Path,
    engine: &mut SelectionEngine<'_>,
    token: &CancellationToken,
    options: &WalkOptions,
) -> Result<WalkOutput> {
    let mut walker = Walker {
        engine,
        token,
        threshold: options.large_tree_threshold,
        visited: 0,
        confirmed: false,
        output: WalkOutput::default(),
    };

    tracing::info!("Walking project directory: {}", root.display());
    walker.walk_dir(root, "", "")?;
    tracing::info!(
        "Walk complete: {} visible entries, {} files to process",
        walker.output.entries.len(),
        walker.output.files_to_process.len()
    );
    Ok(walker.output)
}

struct Walker<'w, 'a> {
    engine: &'w mut SelectionEngine<'a>,
    token: &'w CancellationToken,
    threshold: usize,
    visited: usize,
    confirmed: bool,
    output: WalkOutput,
}

struct Listed {
    is_dir: bool,
    name: String,
    path: PathBuf,
    size: Option<u64>,
}

impl Walker<'_, '_> {
    fn walk_dir(&mut self, dir: &Path, rel_prefix: &str, indent: &str) -> Result<()> {
        self.token.check()?;

        let entries = match list_dir(dir) {
            Ok(entries) => entries,
            Err(e) if !rel_prefix.is_empty() => {
                tracing::warn!("{}", e);
                self.output.warnings.push(e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for listed in entries {
            self.token.check()?;
            self.count_visit()?;

            let rel = if rel_prefix.is_empty() {
                listed.name.clone()
            } else {
                format!("{rel_prefix}/{}", listed.name)
            };
            let entry = if listed.is_dir {
                PathEntry::directory(rel)
            } else {
                PathEntry::file(rel, listed.size)
            };

            if !self.engine.is_visible(&entry) {
                tracing::trace!("Pruned: {}", entry.relative_path);
                continue;
            }

            if listed.is_dir {
                self.output.tree_lines.push(format!("{indent}{}/", listed.name));
                let child_indent = format!("{indent}{INDENT}");
                self.output.entries.push(entry.clone());
                self.walk_dir(&listed.path, &entry.relative_path, &child_indent)?;
            } else {
                self.output.tree_lines.push(format!("{indent}{}", listed.name));
                let rules = self.engine.rules();
                if !rules.has_include_rules() || rules.is_included(&entry.relative_path) {
                    self.output.files_to_process.push(entry.clone());
                }
                self.output.entries.push(entry);
            }
        }

        Ok(())
    }

    fn count_visit(&mut self) -> Result<()> {
        self.visited += 1;
        if self.confirmed || self.visited <= self.threshold {
            return Ok(());
        }

        let prompt = format!(
            "More than {} entries found. This export may take a while. Continue?",
            self.threshold
        );
        if self.engine.confirm(&prompt) {
            self.confirmed = true;
            Ok(())
        } else {
            tracing::info!("Walk stopped after {} entries at the user's request", self.visited);
            Err(ExportError::Cancelled)
        }
    }
}

fn list_dir(dir: &Path) -> Result<Vec<Listed>> {
    let read = fs::read_dir(dir).map_err(|e| ExportError::read(dir, e))?;

    let mut entries: Vec<Listed> = read
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non-UTF-8 file name: {}", path.display());
                return None;
            };

            let file_type = entry.file_type().ok()?;
            if file_type.is_symlink() {
                // Follow links to files only; linked directories could cycle.
                let meta = fs::metadata(&path).ok()?;
                return meta
                    .is_file()
                    .then(|| Listed { is_dir: false, name, path, size: Some(meta.len()) });
            }

            if file_type.is_dir() {
                Some(Listed { is_dir: true, name, path, size: None })
            } else if file_type.is_file() {
                let size = entry.metadata().ok().map(|m| m.len());
                Some(Listed { is_dir: false, name, path, size })
            } else {
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| match b.is_dir.cmp(&a.is_dir) {
        Ordering::Equal => natural_cmp(&a.name, &b.name),
        dir_cmp => dir_cmp,
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Provenance, RuleSet, RuleSetBuilder, DEFAULT_IGNORE_PATTERNS};
    use crate::select::{NoPrompter, ScriptedPrompter};
    use std::fs;
    use tempfile::TempDir;

    fn rules(root: &Path, ignore: &[&str], include: &[&str]) -> RuleSet {
        let mut builder = RuleSetBuilder::new(root);
        builder
            .add_ignore_lines(DEFAULT_IGNORE_PATTERNS.iter().copied(), Provenance::BuiltinDefault)
            .unwrap();
        builder.add_ignore_lines(ignore.iter().copied(), Provenance::GlobalConfig).unwrap();
        builder.add_include_lines(include.iter().copied(), Provenance::GlobalConfig).unwrap();
        builder.build()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("// {rel}\n")).unwrap();
    }

    fn paths(out: &WalkOutput) -> Vec<&str> {
        out.files_to_process.iter().map(|e| e.relative_path.as_str()).collect()
    }

    #[test]
    fn test_directories_first_then_natural_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for rel in ["b.txt", "a10.txt", "a2.txt", "Zed/x.txt", "alpha/y.txt", "C.txt"] {
            touch(root, rel);
        }

        let r = rules(root, &[], &[]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let out = walk(root, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap();

        assert_eq!(
            out.tree_lines,
            vec!["alpha/", "  y.txt", "Zed/", "  x.txt", "a2.txt", "a10.txt", "b.txt", "C.txt"]
        );
        assert_eq!(
            paths(&out),
            vec!["alpha/y.txt", "Zed/x.txt", "a2.txt", "a10.txt", "b.txt", "C.txt"]
        );
    }

    #[test]
    fn test_ignored_dependency_directory_is_pruned() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "node_modules/x.js");
        touch(root, "src/a.ts");

        let r = rules(root, &["node_modules/"], &[]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let out = walk(root, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap();

        assert_eq!(paths(&out), vec!["src/a.ts"]);
        assert!(!out.tree_lines.iter().any(|l| l.contains("node_modules")));
    }

    #[test]
    fn test_included_file_inside_ignored_directory_is_never_reached() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "vendor/keep.js");
        touch(root, "keep.js");

        // `"keep.js"` matches both files by basename, but `vendor` itself is
        // not matched by any include rule, so the walk never descends.
        let r = rules(root, &["vendor/"], &["\"keep.js\""]);
        let mut prompter = ScriptedPrompter::default();
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let out = walk(root, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap();
        drop(engine);

        assert_eq!(paths(&out), vec!["keep.js"]);
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_include_rules_narrow_files_but_not_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "src/a.ts");
        touch(root, "docs/guide.md");

        let r = rules(root, &[], &["src/"]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let out = walk(root, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap();

        assert_eq!(paths(&out), vec!["src/a.ts"]);
        assert!(out.tree_lines.contains(&"  guide.md".to_string()));
    }

    #[test]
    fn test_directory_covered_by_include_is_descended() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "src/gen/y.ts");
        touch(root, "src/a.ts");

        let r = rules(root, &["src/gen/"], &["src/**"]);
        let mut prompter = ScriptedPrompter::default();
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let out = walk(root, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap();
        drop(engine);

        assert_eq!(paths(&out), vec!["src/gen/y.ts", "src/a.ts"]);
        assert!(prompter.asked().is_empty(), "the walk itself never prompts");
    }

    #[test]
    fn test_walk_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for rel in ["src/lib.rs", "src/main.rs", "README.md", "tests/t1.rs", "tests/t10.rs"] {
            touch(root, rel);
        }

        let r = rules(root, &["*.md"], &[]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let token = CancellationToken::new();
        let first = walk(root, &mut engine, &token, &WalkOptions::default()).unwrap();
        let second = walk(root, &mut engine, &token, &WalkOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cancelled_walk_returns_cancelled() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.txt");

        let r = rules(tmp.path(), &[], &[]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);
        let token = CancellationToken::new();
        token.cancel();

        let err = walk(tmp.path(), &mut engine, &token, &WalkOptions::default()).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_large_tree_requires_confirmation() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(tmp.path(), &format!("f{i}.txt"));
        }
        let r = rules(tmp.path(), &[], &[]);
        let options = WalkOptions { large_tree_threshold: 3 };

        let mut declined = ScriptedPrompter::new(["No"]);
        let mut engine = SelectionEngine::new(&r, &mut declined);
        let err = walk(tmp.path(), &mut engine, &CancellationToken::new(), &options).unwrap_err();
        assert!(err.is_cancelled());

        let mut accepted = ScriptedPrompter::new(["Yes"]);
        let mut engine = SelectionEngine::new(&r, &mut accepted);
        let out = walk(tmp.path(), &mut engine, &CancellationToken::new(), &options).unwrap();
        drop(engine);
        assert_eq!(out.files_to_process.len(), 5);
        assert_eq!(accepted.asked().len(), 1);
    }

    #[test]
    fn test_missing_root_is_an_error_naming_the_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let r = rules(tmp.path(), &[], &[]);
        let mut prompter = NoPrompter;
        let mut engine = SelectionEngine::new(&r, &mut prompter);

        let err = walk(&missing, &mut engine, &CancellationToken::new(), &WalkOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
