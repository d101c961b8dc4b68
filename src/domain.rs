//! Core data types shared across modules.

use serde::{Deserialize, Serialize};

/// Default maximum file size: 1 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Default number of walked entries before the user is asked to confirm.
pub const DEFAULT_LARGE_TREE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// A filesystem node found by a walk. Never cached across exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// POSIX-separated, relative to the project root.
    pub relative_path: String,
    pub kind: EntryKind,
    /// Byte size, files only.
    pub size: Option<u64>,
}

impl PathEntry {
    pub fn file(relative_path: impl Into<String>, size: Option<u64>) -> Self {
        Self { relative_path: relative_path.into(), kind: EntryKind::File, size }
    }

    pub fn directory(relative_path: impl Into<String>) -> Self {
        Self { relative_path: relative_path.into(), kind: EntryKind::Directory, size: None }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Which command produced an export; selects description and heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// Whole-project export.
    Main,
    /// Export of an explicit list of open files.
    ActiveTabs,
    /// Export of an interactive selection.
    Selection,
}

/// Per-entry-point description file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Descriptions {
    pub main: Option<String>,
    pub active_tabs: Option<String>,
}

/// `description` accepts a single path-or-text string or a per-entry-point map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionSetting {
    Single(String),
    PerEntryPoint(Descriptions),
}

/// Project-level export settings (`exportconfig.json` and friends).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub ignore_file: String,
    pub include_file: String,
    pub output: String,
    pub include_project_structure: bool,
    pub remove_comments: bool,
    pub max_file_size: u64,
    pub allow_ignored_on_tabs_export: bool,
    pub description: Option<DescriptionSetting>,
    pub descriptions: Descriptions,
    pub large_tree_threshold: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ignore_file: ".export-ignore".to_string(),
            include_file: ".export-include".to_string(),
            output: "export.md".to_string(),
            include_project_structure: false,
            remove_comments: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allow_ignored_on_tabs_export: false,
            description: None,
            descriptions: Descriptions::default(),
            large_tree_threshold: DEFAULT_LARGE_TREE_THRESHOLD,
        }
    }
}

/// Host-wide settings applied to every project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalConfig {
    // Snake-case aliases accept `DIR2FILE_GLOBAL_IGNORE_RULES` style env keys.
    #[serde(alias = "global_ignore_rules")]
    pub global_ignore_rules: Vec<String>,
    #[serde(alias = "global_include_rules")]
    pub global_include_rules: Vec<String>,
    #[serde(alias = "strip_comments_from_extensions")]
    pub strip_comments_from_extensions: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            global_ignore_rules: Vec::new(),
            global_include_rules: Vec::new(),
            strip_comments_from_extensions: crate::render::comments::DEFAULT_STRIP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_config_defaults() {
        let cfg = ExportConfig::default();
        assert_eq!(cfg.ignore_file, ".export-ignore");
        assert_eq!(cfg.include_file, ".export-include");
        assert_eq!(cfg.output, "export.md");
        assert_eq!(cfg.max_file_size, 1_048_576);
        assert!(!cfg.remove_comments);
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let cfg: ExportConfig =
            serde_json::from_str(r#"{"output": "out/all.md", "includeProjectStructure": true}"#)
                .unwrap();
        assert_eq!(cfg.output, "out/all.md");
        assert!(cfg.include_project_structure);
        assert_eq!(cfg.ignore_file, ".export-ignore");
    }

    #[test]
    fn test_description_accepts_string_or_map() {
        let cfg: ExportConfig = serde_json::from_str(r#"{"description": "README.md"}"#).unwrap();
        assert_eq!(cfg.description, Some(DescriptionSetting::Single("README.md".to_string())));

        let cfg: ExportConfig =
            serde_json::from_str(r#"{"description": {"main": "a.md", "activeTabs": "b.md"}}"#)
                .unwrap();
        assert_eq!(
            cfg.description,
            Some(DescriptionSetting::PerEntryPoint(Descriptions {
                main: Some("a.md".to_string()),
                active_tabs: Some("b.md".to_string()),
            }))
        );
    }
}
