//! Error taxonomy for export operations.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ExportError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Malformed configuration value or config file.
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A rule line that cannot be compiled into a matcher.
    #[error("Invalid pattern \"{pattern}\" from {source_name}: {message}")]
    InvalidPattern { pattern: String, source_name: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory {0} does not exist and was not created")]
    OutputDirMissing(PathBuf),

    /// Cooperative cancellation. Not a failure.
    #[error("Export cancelled")]
    Cancelled,

    #[error("No files were selected for export")]
    NothingToExport,
}

impl ExportError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
