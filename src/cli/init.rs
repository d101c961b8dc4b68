//! Rule-file scaffolding command

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;

use super::utils::{parse_csv, ProjectArgs};
use crate::config::load_export_config;
use crate::rules::{gitignore_seed, write_rule_file, RuleFileKind, ScaffoldMode, ScaffoldOutcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum InitKind {
    /// The ignore-rule file (`ignoreFile`, default `.export-ignore`)
    Ignore,
    /// The include-rule file (`includeFile`, default `.export-include`)
    Include,
}

#[derive(Args)]
pub struct InitArgs {
    /// Which rule file to write
    #[arg(value_enum)]
    pub kind: InitKind,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Patterns to write (comma-separated). `ignore` defaults to the
    /// project's .gitignore entries.
    #[arg(long, value_name = "PATTERNS")]
    pub patterns: Option<String>,

    /// Add to an existing file
    #[arg(long, conflicts_with = "force")]
    pub append: bool,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let root = args.project.root()?;
    let config = load_export_config(&root, args.project.config.as_deref())?;

    let (kind, file_name) = match args.kind {
        InitKind::Ignore => (RuleFileKind::Ignore, config.ignore_file),
        InitKind::Include => (RuleFileKind::Include, config.include_file),
    };
    let path = root.join(&file_name);

    let patterns = match parse_csv(&args.patterns) {
        Some(patterns) => patterns,
        None if kind == RuleFileKind::Ignore => gitignore_seed(&root),
        None => Vec::new(),
    };
    if patterns.is_empty() {
        anyhow::bail!("No patterns given; pass them with --patterns \"a, b, c\"");
    }

    let mode = if args.append {
        ScaffoldMode::Append
    } else if args.force {
        ScaffoldMode::Overwrite
    } else {
        ScaffoldMode::Create
    };
    if mode == ScaffoldMode::Create && path.exists() {
        anyhow::bail!("{file_name} already exists; use --append or --force");
    }

    let outcome = write_rule_file(&root, &path, kind, &patterns, mode)?;
    let verb = match outcome {
        ScaffoldOutcome::Created => "created",
        ScaffoldOutcome::Appended => "updated",
        ScaffoldOutcome::Overwritten => "replaced",
    };
    println!("{} {file_name} {verb} ({} patterns)", style("✓").green(), patterns.len());
    Ok(())
}
