//! Remembered interactive selection, stored beside the project.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::output::write_atomic;
use crate::domain::PathEntry;
use crate::error::{ExportError, Result};

pub const SELECTION_FILE: &str = ".export-selection.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSelection {
    /// Files and directories picked last time, in walk order.
    pub files: Vec<String>,
}

pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(root: &Path) -> Self {
        Self { path: root.join(SELECTION_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previously saved selection; empty when none exists. A corrupt file is
    /// reported and treated as empty.
    pub fn load(&self) -> Result<SavedSelection> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SavedSelection::default()),
            Err(e) => return Err(ExportError::read(&self.path, e)),
        };
        match serde_json::from_str(&content) {
            Ok(saved) => Ok(saved),
            Err(e) => {
                let path = self.path.display();
                tracing::warn!("Ignoring unreadable saved selection {}: {}", path, e);
                Ok(SavedSelection::default())
            }
        }
    }

    pub fn save(&self, selection: &SavedSelection) -> Result<()> {
        let json = serde_json::to_string_pretty(selection).map_err(|e| ExportError::Config {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        write_atomic(&self.path, &json)
    }
}

/// Files to export for a picked set of entries, in walk order.
///
/// A picked directory stands for every visible file beneath it.
pub fn expand_selection(entries: &[PathEntry], picked: &[String]) -> Vec<String> {
    let dirs: Vec<String> = entries
        .iter()
        .filter(|e| e.is_dir() && picked.contains(&e.relative_path))
        .map(|e| format!("{}/", e.relative_path))
        .collect();

    entries
        .iter()
        .filter(|e| !e.is_dir())
        .filter(|e| {
            picked.contains(&e.relative_path)
                || dirs.iter().any(|d| e.relative_path.starts_with(d.as_str()))
        })
        .map(|e| e.relative_path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_picked_directory_expands_to_its_files() {
        let entries = vec![
            PathEntry::directory("src"),
            PathEntry::file("src/a.rs", Some(1)),
            PathEntry::directory("src/sub"),
            PathEntry::file("src/sub/b.rs", Some(1)),
            PathEntry::file("srcfile.txt", Some(1)),
            PathEntry::file("README.md", Some(1)),
        ];
        let picked = vec!["src".to_string(), "README.md".to_string()];
        assert_eq!(
            expand_selection(&entries, &picked),
            vec!["src/a.rs", "src/sub/b.rs", "README.md"]
        );
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = SelectionStore::new(tmp.path());
        assert_eq!(store.load().unwrap(), SavedSelection::default());
    }

    #[test]
    fn test_saved_selection_is_reloaded() {
        let tmp = TempDir::new().unwrap();
        let store = SelectionStore::new(tmp.path());
        let saved = SavedSelection { files: vec!["src/a.ts".to_string(), "README.md".to_string()] };
        store.save(&saved).unwrap();

        assert_eq!(SelectionStore::new(tmp.path()).load().unwrap(), saved);
    }

    #[test]
    fn test_corrupt_store_is_treated_as_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SELECTION_FILE), "[oops").unwrap();
        let store = SelectionStore::new(tmp.path());
        assert!(store.load().unwrap().files.is_empty());
    }
}
