//! Turns the walk's file list into document sections.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::comments::CommentStripper;
use super::document::{FileSection, SectionBody};
use crate::cancel::CancellationToken;
use crate::domain::PathEntry;
use crate::error::{ExportError, Result};
use crate::select::{SelectionEngine, Verdict};
use crate::utils::{decode_text, extension, is_binary_bytes};

/// Receives user-facing progress and warnings during assembly.
pub trait ExportObserver {
    fn on_progress(&mut self, _done: usize, _total: usize, _path: &str) {}

    fn on_warning(&mut self, _message: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ExportObserver for NullObserver {}

/// How the final include/exclude verdict is reached for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionMode {
    /// Files found by the walk; ignored-but-included files are prompted.
    Walk,
    /// Paths the user asked for by name (open files).
    Explicit { allow_ignored: bool },
    /// Paths the user picked interactively; no further checks.
    Chosen,
}

pub struct AssembleOptions<'o> {
    pub root: &'o Path,
    pub max_file_size: u64,
    /// Present when comment removal is enabled.
    pub stripper: Option<&'o dyn CommentStripper>,
    pub mode: DecisionMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledFiles {
    pub sections: Vec<FileSection>,
    /// Paths the engine excluded.
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

/// Read, decide on and format every file in `files`, in order.
///
/// Per-file problems become placeholders and warnings; only cancellation
/// and an empty result abort.
pub fn assemble(
    files: &[PathEntry],
    engine: &mut SelectionEngine<'_>,
    options: &AssembleOptions<'_>,
    observer: &mut dyn ExportObserver,
    token: &CancellationToken,
) -> Result<AssembledFiles> {
    let total = files.len();
    let mut seen = HashSet::new();
    let mut out = AssembledFiles::default();

    for (idx, entry) in files.iter().enumerate() {
        token.check()?;
        let path = entry.relative_path.as_str();

        if seen.insert(path) {
            let verdict = match options.mode {
                DecisionMode::Walk => engine.decide(entry, true, true),
                DecisionMode::Explicit { allow_ignored } => {
                    engine.decide_explicit(entry, allow_ignored)
                }
                DecisionMode::Chosen => Verdict::Include,
            };

            match verdict {
                Verdict::Include => {
                    let section = read_section(entry, options, &mut out.warnings, observer);
                    tracing::debug!("Processed file: {}", path);
                    out.sections.push(section);
                }
                Verdict::Exclude => {
                    tracing::debug!("Skipped file: {}", path);
                    out.skipped.push(path.to_string());
                }
            }
        }

        observer.on_progress(idx + 1, total, path);
    }

    if out.sections.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    tracing::info!("Assembled {} file sections", out.sections.len());
    Ok(out)
}

fn read_section(
    entry: &PathEntry,
    options: &AssembleOptions<'_>,
    warnings: &mut Vec<String>,
    observer: &mut dyn ExportObserver,
) -> FileSection {
    let relative_path = entry.relative_path.clone();
    let full_path = options.root.join(&relative_path);
    let mut warn = |message: String| {
        tracing::warn!("{}", message);
        observer.on_warning(&message);
        warnings.push(message);
    };

    let size = match entry.size {
        Some(size) => Ok(size),
        None => fs::metadata(&full_path).map(|m| m.len()),
    };
    let bytes = size.and_then(|size| {
        if size > options.max_file_size {
            Ok(Err(size))
        } else {
            fs::read(&full_path).map(Ok)
        }
    });

    let bytes = match bytes {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(size)) => {
            tracing::debug!("{} exceeds the size limit ({} bytes)", relative_path, size);
            return FileSection { relative_path, body: SectionBody::TooLarge { size } };
        }
        Err(e) => {
            warn(format!("Could not read {relative_path}: {e}"));
            let body = SectionBody::Unreadable { error: e.to_string() };
            return FileSection { relative_path, body };
        }
    };

    if is_binary_bytes(&bytes) {
        tracing::debug!("Binary file skipped: {}", relative_path);
        return FileSection { relative_path, body: SectionBody::Binary };
    }

    let language = extension(&relative_path).to_string();
    let (mut text, encoding) = decode_text(&bytes);
    if encoding != "utf-8" {
        tracing::debug!("Decoded {} as {}", relative_path, encoding);
    }

    if let Some(stripper) = options.stripper {
        match stripper.strip(&text, &language) {
            Some(stripped) => text = stripped,
            None => warn(format!(
                "Comment removal is not supported for {relative_path}; content kept as is"
            )),
        }
    }

    FileSection { relative_path, body: SectionBody::Content { language, text } }
}
