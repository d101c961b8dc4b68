//! Host-wide settings: a TOML file in the user's config directory layered
//! under `DIR2FILE_` environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;

use crate::domain::GlobalConfig;
use crate::error::{ExportError, Result};

pub const ENV_PREFIX: &str = "DIR2FILE_";

/// `<config dir>/dir2file/config.toml`, when the platform has a config dir.
pub fn default_global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dir2file").join("config.toml"))
}

/// Load the global settings. An explicit `path` must exist; the default
/// location is optional.
pub fn load_global_config(path: Option<&Path>) -> Result<GlobalConfig> {
    let file = match path {
        Some(path) if !path.is_file() => {
            return Err(ExportError::Config {
                path: path.to_path_buf(),
                message: "global config file not found".to_string(),
            });
        }
        Some(path) => Some(path.to_path_buf()),
        None => default_global_config_path(),
    };

    // Missing keys fall back to `GlobalConfig::default()` through serde.
    let mut figment = Figment::new();
    if let Some(file) = &file {
        tracing::debug!("Global config candidate: {}", file.display());
        figment = figment.merge(Toml::file(file));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX));

    figment.extract().map_err(|e| ExportError::Config {
        path: file.unwrap_or_default(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_values_override_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "globalIgnoreRules = ['*.log', 'tmp/']\nstrip_comments_from_extensions = ['py']\n",
        )
        .expect("write");

        let cfg = load_global_config(Some(&path)).expect("config");
        assert_eq!(cfg.global_ignore_rules, vec!["*.log", "tmp/"]);
        assert!(cfg.global_include_rules.is_empty());
        assert_eq!(cfg.strip_comments_from_extensions, vec!["py"]);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_global_config(Some(&tmp.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ExportError::Config { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "globalIgnoreRules = 5\n").expect("write");
        assert!(load_global_config(Some(&path)).is_err());
    }
}
