//! Leading description text for an export.

use std::path::Path;

use crate::domain::{DescriptionSetting, EntryPoint, ExportConfig};
use crate::utils::read_text;

/// Resolve the description for `entry_point`.
///
/// `description` as a single string is a path relative to `root` when that
/// file exists and literal text otherwise. The per-entry-point map and
/// `descriptions` hold paths only; a missing file yields no description.
pub fn resolve_description(
    root: &Path,
    config: &ExportConfig,
    entry_point: EntryPoint,
) -> Option<String> {
    let pick = |main: &Option<String>, active_tabs: &Option<String>| match entry_point {
        EntryPoint::Main | EntryPoint::Selection => main.clone(),
        EntryPoint::ActiveTabs => active_tabs.clone(),
    };

    match &config.description {
        Some(DescriptionSetting::Single(value)) if !value.trim().is_empty() => {
            Some(read_path(root, value).unwrap_or_else(|| value.clone()))
        }
        Some(DescriptionSetting::PerEntryPoint(map)) => {
            pick(&map.main, &map.active_tabs).and_then(|p| read_path(root, &p))
        }
        _ => pick(&config.descriptions.main, &config.descriptions.active_tabs)
            .and_then(|p| read_path(root, &p)),
    }
}

fn read_path(root: &Path, relative: &str) -> Option<String> {
    if relative.trim().is_empty() {
        return None;
    }
    let path = root.join(relative);
    if !path.is_file() {
        return None;
    }
    match read_text(&path) {
        Ok((text, _)) => Some(text),
        Err(e) => {
            tracing::warn!("Could not read description: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Descriptions;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_description_is_path_or_literal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ABOUT.md"), "From file").unwrap();

        let mut cfg = ExportConfig {
            description: Some(DescriptionSetting::Single("ABOUT.md".to_string())),
            ..ExportConfig::default()
        };
        assert_eq!(
            resolve_description(tmp.path(), &cfg, EntryPoint::Main).as_deref(),
            Some("From file")
        );

        cfg.description = Some(DescriptionSetting::Single("A literal summary".to_string()));
        assert_eq!(
            resolve_description(tmp.path(), &cfg, EntryPoint::ActiveTabs).as_deref(),
            Some("A literal summary")
        );
    }

    #[test]
    fn test_per_entry_point_descriptions_are_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.md"), "Main intro").unwrap();

        let cfg = ExportConfig {
            descriptions: Descriptions {
                main: Some("main.md".to_string()),
                active_tabs: Some("missing.md".to_string()),
            },
            ..ExportConfig::default()
        };
        assert_eq!(
            resolve_description(tmp.path(), &cfg, EntryPoint::Main).as_deref(),
            Some("Main intro")
        );
        assert_eq!(resolve_description(tmp.path(), &cfg, EntryPoint::ActiveTabs), None);
    }

    #[test]
    fn test_no_description_configured() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            resolve_description(tmp.path(), &ExportConfig::default(), EntryPoint::Main),
            None
        );
    }
}
