//! dir2file: export a project directory into a single Markdown document.
//!
//! The library walks a project, decides which files belong in the export
//! (ignore rules, include rules and interactive overrides), and renders the
//! chosen files into one document written atomically.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod rules;
pub mod scan;
pub mod select;
pub mod utils;

pub use cancel::CancellationToken;
pub use error::{ExportError, Result};
