//! Project config file loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ExportConfig;
use crate::error::{ExportError, Result};

const CANDIDATES: [&str; 4] =
    ["exportconfig.json", "exportconfig.toml", "exportconfig.yaml", "exportconfig.yml"];

/// Load the project's export settings.
///
/// An explicitly given file must exist. Any config file that fails to parse
/// aborts the operation; no defaults are substituted.
pub fn load_export_config(root: &Path, config_path: Option<&Path>) -> Result<ExportConfig> {
    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(ExportConfig::default());
    };

    let content = fs::read_to_string(&config_file).map_err(|e| ExportError::read(&config_file, e))?;

    let cfg = parse_config(&content, &config_file)?;
    tracing::debug!("Loaded export config from {}", config_file.display());
    Ok(cfg)
}

fn parse_config(content: &str, config_file: &Path) -> Result<ExportConfig> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let config_error = |message: String| ExportError::Config {
        path: config_file.to_path_buf(),
        message,
    };

    match ext.as_str() {
        "json" => serde_json::from_str(content).map_err(|e| config_error(e.to_string())),
        "toml" => toml::from_str(content).map_err(|e| config_error(e.to_string())),
        "yaml" | "yml" => {
            // An empty YAML document means "all defaults".
            if content.trim().is_empty() {
                return Ok(ExportConfig::default());
            }
            serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))
        }
        other => Err(config_error(format!("unsupported config extension '.{other}'"))),
    }
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| root.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DescriptionSetting;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_export_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, ExportConfig::default());
    }

    #[test]
    fn test_json_config_is_discovered() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("exportconfig.json"),
            r#"{"output": "docs/export.md", "removeComments": true, "maxFileSize": 10}"#,
        )
        .expect("write");

        let cfg = load_export_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.output, "docs/export.md");
        assert!(cfg.remove_comments);
        assert_eq!(cfg.max_file_size, 10);
    }

    #[test]
    fn test_json_wins_over_toml() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("exportconfig.json"), r#"{"output": "a.md"}"#).expect("write");
        fs::write(tmp.path().join("exportconfig.toml"), "output = 'b.md'\n").expect("write");

        let cfg = load_export_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.output, "a.md");
    }

    #[test]
    fn test_toml_and_yaml_use_the_same_keys() {
        let tmp = TempDir::new().expect("tmp");
        let toml_path = tmp.path().join("settings.toml");
        fs::write(&toml_path, "includeProjectStructure = true\ndescription = 'README.md'\n")
            .expect("write");
        let cfg = load_export_config(tmp.path(), Some(&toml_path)).expect("toml");
        assert!(cfg.include_project_structure);
        assert_eq!(cfg.description, Some(DescriptionSetting::Single("README.md".to_string())));

        let yaml_path = tmp.path().join("settings.yaml");
        fs::write(&yaml_path, "allowIgnoredOnTabsExport: true\ndescriptions:\n  main: intro.md\n")
            .expect("write");
        let cfg = load_export_config(tmp.path(), Some(&yaml_path)).expect("yaml");
        assert!(cfg.allow_ignored_on_tabs_export);
        assert_eq!(cfg.descriptions.main.as_deref(), Some("intro.md"));
    }

    #[test]
    fn test_explicit_invalid_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.json");
        fs::write(&path, r#"{"maxFileSize": "big"}"#).expect("write");

        let err = load_export_config(tmp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, ExportError::Config { .. }));
    }

    #[test]
    fn test_explicit_missing_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("nope.json");
        assert!(load_export_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("exportconfig.json");
        fs::write(&path, r#"{"output": "ctx.md", "maxFileSize": 10,}"#).expect("write");

        let err = load_export_config(tmp.path(), None).unwrap_err();
        match err {
            ExportError::Config { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension_is_rejected_when_explicit() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("exportconfig.ini");
        fs::write(&path, "output=x").expect("write");
        assert!(load_export_config(tmp.path(), Some(&path)).is_err());
    }
}
