//! Creating and extending project rule files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::pattern::{Pattern, Provenance};
use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFileKind {
    Ignore,
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldMode {
    /// Fail if the file exists.
    Create,
    Append,
    Overwrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created,
    Appended,
    Overwritten,
}

/// Split comma-separated user input into patterns.
pub fn split_patterns(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// Non-empty lines of the project's `.gitignore`, used to seed a new ignore
/// file. Missing or unreadable files give nothing.
pub fn gitignore_seed(root: &Path) -> Vec<String> {
    fs::read_to_string(root.join(".gitignore"))
        .map(|content| {
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Write `patterns` to the rule file at `path`, one per line.
///
/// Every pattern is compiled first, so an invalid one leaves the file
/// untouched.
pub fn write_rule_file(
    root: &Path,
    path: &Path,
    kind: RuleFileKind,
    patterns: &[String],
    mode: ScaffoldMode,
) -> Result<ScaffoldOutcome> {
    let provenance = Provenance::ProjectFile(path.to_path_buf());
    for pattern in patterns {
        match kind {
            RuleFileKind::Ignore => Pattern::ignore(pattern, provenance.clone()).map(drop)?,
            RuleFileKind::Include => {
                let parsed = Pattern::include(pattern, provenance.clone(), root)?;
                if parsed.is_some_and(|p| p.is_outside_root()) {
                    return Err(ExportError::InvalidPattern {
                        pattern: pattern.clone(),
                        source_name: provenance.to_string(),
                        message: "absolute path is outside the project root".to_string(),
                    });
                }
            }
        }
    }

    let mut body = patterns.join("\n");
    body.push('\n');

    let exists = path.exists();
    let outcome = match (mode, exists) {
        (ScaffoldMode::Create, true) => {
            return Err(ExportError::Config {
                path: path.to_path_buf(),
                message: "rule file already exists".to_string(),
            });
        }
        (ScaffoldMode::Append, true) => {
            let mut file = OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(|e| ExportError::write(path, e))?;
            let current = fs::read(path).map_err(|e| ExportError::read(path, e))?;
            if !current.is_empty() && !current.ends_with(b"\n") {
                body.insert(0, '\n');
            }
            file.write_all(body.as_bytes()).map_err(|e| ExportError::write(path, e))?;
            ScaffoldOutcome::Appended
        }
        (ScaffoldMode::Overwrite, true) => {
            fs::write(path, &body).map_err(|e| ExportError::write(path, e))?;
            ScaffoldOutcome::Overwritten
        }
        (_, false) => {
            fs::write(path, &body).map_err(|e| ExportError::write(path, e))?;
            ScaffoldOutcome::Created
        }
    };

    tracing::info!("{:?} {} with {} patterns", outcome, path.display(), patterns.len());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(
        root: &Path,
        path: &Path,
        patterns: &[&str],
        mode: ScaffoldMode,
    ) -> Result<ScaffoldOutcome> {
        let patterns: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        write_rule_file(root, path, RuleFileKind::Ignore, &patterns, mode)
    }

    #[test]
    fn test_split_patterns_trims_and_drops_empty() {
        assert_eq!(
            split_patterns(" dist/ , *.log,, node_modules/ "),
            vec!["dist/", "*.log", "node_modules/"]
        );
    }

    #[test]
    fn test_gitignore_seed() {
        let tmp = TempDir::new().unwrap();
        assert!(gitignore_seed(tmp.path()).is_empty());
        fs::write(tmp.path().join(".gitignore"), "target/\n\n*.log\n").unwrap();
        assert_eq!(gitignore_seed(tmp.path()), vec!["target/", "*.log"]);
    }

    #[test]
    fn test_create_then_append_and_overwrite() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let path = root.join(".export-ignore");

        let outcome = write(root, &path, &["dist/"], ScaffoldMode::Create).unwrap();
        assert_eq!(outcome, ScaffoldOutcome::Created);

        let err = write(root, &path, &["x"], ScaffoldMode::Create).unwrap_err();
        assert!(matches!(err, ExportError::Config { .. }));

        write(root, &path, &["*.log"], ScaffoldMode::Append).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "dist/\n*.log\n");

        write(root, &path, &["out/"], ScaffoldMode::Overwrite).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "out/\n");
    }

    #[test]
    fn test_invalid_include_pattern_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".export-include");
        let err = write_rule_file(
            tmp.path(),
            &path,
            RuleFileKind::Include,
            &["!src/".to_string()],
            ScaffoldMode::Create,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::InvalidPattern { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_include_outside_root_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let path = tmp.path().join(".export-include");
        let outside = format!("\"{}\"", other.path().join("README.md").display());

        let err = write_rule_file(
            tmp.path(),
            &path,
            RuleFileKind::Include,
            &[outside],
            ScaffoldMode::Create,
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the project root"));
        assert!(!path.exists());
    }
}
