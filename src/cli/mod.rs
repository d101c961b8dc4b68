//! Command-line interface for dir2file
//!
//! Provides `export`, `files`, `select`, `init`, `tree` and `completions`
//! subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod export;
mod files;
mod init;
mod progress;
mod prompt;
mod select;
mod tree;
mod utils;

/// Export a project directory into a single Markdown file
#[derive(Parser)]
#[command(name = "dir2file")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer "Yes" to every prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every selected file of the project
    Export(export::ExportArgs),

    /// Export an explicit list of files (for example, an editor's open tabs)
    Files(files::FilesArgs),

    /// Pick files interactively and export them
    Select(select::SelectArgs),

    /// Create or extend the project's ignore or include rule file
    Init(init::InitArgs),

    /// Print the project structure as the export would see it
    Tree(tree::TreeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Export(args) => export::run(args, cli.yes),
        Commands::Files(args) => files::run(args, cli.yes),
        Commands::Select(args) => select::run(args, cli.yes),
        Commands::Init(args) => init::run(args),
        Commands::Tree(args) => tree::run(args, cli.yes),
        Commands::Completions(args) => completions::run(args),
    }
}
