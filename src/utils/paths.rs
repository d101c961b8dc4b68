//! Path normalization

use std::path::{Component, Path};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Render `path` relative to `root` with forward slashes.
///
/// Returns `None` when `path` is not under `root`.
pub fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Parent directory of a POSIX relative path; the root is `""`.
pub fn parent_dir(relative_path: &str) -> &str {
    match relative_path.rfind('/') {
        Some(idx) => &relative_path[..idx],
        None => "",
    }
}

pub fn file_name(relative_path: &str) -> &str {
    match relative_path.rfind('/') {
        Some(idx) => &relative_path[idx + 1..],
        None => relative_path,
    }
}

/// Extension without the leading dot, as used for code fence tags.
pub fn extension(relative_path: &str) -> &str {
    let name = file_name(relative_path);
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx + 1..],
    }
}
