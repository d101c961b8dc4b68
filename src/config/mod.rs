//! Configuration loading and merging
//!
//! Project settings come from `exportconfig.*` at the project root, host
//! settings from the global TOML file and environment. Command-line flags
//! override both (CLI > File > Defaults).

pub mod global;
pub mod loader;

pub use global::{default_global_config_path, load_global_config};
pub use loader::load_export_config;

use crate::domain::{DescriptionSetting, ExportConfig};

/// Command-line values that replace file settings when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output: Option<String>,
    pub include_project_structure: Option<bool>,
    pub remove_comments: Option<bool>,
    pub max_file_size: Option<u64>,
    pub description: Option<String>,
    pub allow_ignored_on_tabs_export: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: ExportConfig) -> ExportConfig {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(v) = self.include_project_structure {
            config.include_project_structure = v;
        }
        if let Some(v) = self.remove_comments {
            config.remove_comments = v;
        }
        if let Some(v) = self.max_file_size {
            config.max_file_size = v;
        }
        if let Some(description) = &self.description {
            config.description = Some(DescriptionSetting::Single(description.clone()));
        }
        if let Some(v) = self.allow_ignored_on_tabs_export {
            config.allow_ignored_on_tabs_export = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_replace_given_values() {
        let base = ExportConfig { output: "from-file.md".to_string(), ..ExportConfig::default() };
        let overrides = ConfigOverrides {
            remove_comments: Some(true),
            max_file_size: Some(42),
            ..ConfigOverrides::default()
        };

        let merged = overrides.apply(base);
        assert_eq!(merged.output, "from-file.md");
        assert!(merged.remove_comments);
        assert_eq!(merged.max_file_size, 42);
        assert!(!merged.include_project_structure);
    }
}
