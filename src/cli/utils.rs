//! Shared CLI arguments and helpers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::cancel::CancellationToken;
use crate::config::ConfigOverrides;
use crate::export::{ExportContext, ExportOutcome};

/// Where the project is and which config files to read.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Project config file (defaults to exportconfig.json/.toml/.yaml in the root)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Global config file (defaults to <config dir>/dir2file/config.toml)
    #[arg(long, value_name = "FILE", env = "DIR2FILE_GLOBAL_CONFIG")]
    pub global_config: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn root(&self) -> Result<PathBuf> {
        let root = self
            .path
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", self.path.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }
        Ok(root)
    }

    pub fn load(&self, overrides: &ConfigOverrides) -> Result<ExportContext> {
        let root = self.root()?;
        let ctx = ExportContext::load(
            &root,
            self.config.as_deref(),
            self.global_config.as_deref(),
            overrides,
        )?;
        Ok(ctx)
    }
}

/// Flags that override the project's export settings.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output file, relative to the project root
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Prepend the project structure tree
    #[arg(long)]
    pub structure: bool,

    /// Strip comments from supported source files
    #[arg(long)]
    pub strip_comments: bool,

    /// Replace files larger than this (bytes) with a placeholder
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Description text, or a path to a file holding it
    #[arg(short, long, value_name = "TEXT|FILE")]
    pub description: Option<String>,
}

impl OutputArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output: self.output.clone(),
            include_project_structure: self.structure.then_some(true),
            remove_comments: self.strip_comments.then_some(true),
            max_file_size: self.max_file_size,
            description: self.description.clone(),
            allow_ignored_on_tabs_export: None,
        }
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| crate::rules::split_patterns(s))
}

pub fn print_outcome(root: &Path, outcome: &ExportOutcome) {
    let shown = outcome.output_path.strip_prefix(root).unwrap_or(&outcome.output_path);
    println!();
    println!("{}", style("Export complete!").green().bold());
    println!("  Output:          {}", shown.display());
    println!("  Files exported:  {}", outcome.files_exported);
    if outcome.placeholders > 0 {
        println!("  Placeholders:    {}", outcome.placeholders);
    }
    if !outcome.skipped.is_empty() {
        println!("  Files skipped:   {}", outcome.skipped.len());
    }
    if !outcome.warnings.is_empty() {
        println!();
        println!("{}", style(format!("{} warning(s):", outcome.warnings.len())).yellow());
        for warning in outcome.warnings.iter().take(5) {
            println!("  {warning}");
        }
        if outcome.warnings.len() > 5 {
            println!("  ... and {} more", outcome.warnings.len() - 5);
        }
    }
}

/// Token cancelled by Ctrl-C. A second Ctrl-C exits immediately.
pub fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || on_interrupt(&handler_token)) {
        tracing::warn!("Could not install Ctrl-C handler: {}", e);
    }
    token
}

fn on_interrupt(token: &CancellationToken) {
    if token.is_cancelled() {
        std::process::exit(130);
    }
    tracing::debug!("Interrupt received; cancelling");
    token.cancel();
}

/// Print the cancellation notice. Cancelling is not a failure.
pub fn print_cancelled() {
    eprintln!("{}", style("Export operation was cancelled").yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv(&None), None);
        assert_eq!(
            parse_csv(&Some("a, b,,c ".to_string())),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_first_interrupt_cancels_the_run() {
        let token = CancellationToken::new();
        let observed = token.clone();
        on_interrupt(&token);
        assert!(observed.is_cancelled());
        assert!(observed.check().is_err());
    }

    #[test]
    fn test_output_args_only_override_given_flags() {
        let args = OutputArgs { strip_comments: true, ..OutputArgs::default() };
        let overrides = args.overrides();
        assert_eq!(overrides.remove_comments, Some(true));
        assert_eq!(overrides.include_project_structure, None);
        assert_eq!(overrides.output, None);
    }
}
