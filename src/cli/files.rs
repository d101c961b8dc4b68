//! Open-files export command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::progress::ProgressObserver;
use super::prompt::prompter;
use super::utils::{
    cancel_on_interrupt, print_cancelled, print_outcome, OutputArgs, ProjectArgs,
};
use crate::error::ExportError;
use crate::export::{export_files, ExportHooks};

#[derive(Args)]
pub struct FilesArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Export ignored files without asking
    #[arg(long)]
    pub allow_ignored: bool,

    /// Files to export, absolute or relative to the project root
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

pub fn run(args: FilesArgs, assume_yes: bool) -> Result<()> {
    let mut overrides = args.output.overrides();
    overrides.allow_ignored_on_tabs_export = args.allow_ignored.then_some(true);
    let ctx = args.project.load(&overrides)?;

    let mut observer = ProgressObserver::new();
    let mut prompter = prompter(assume_yes, Some(observer.bar()));
    let token = cancel_on_interrupt();

    let result = export_files(
        &ctx,
        &args.files,
        ExportHooks { prompter: prompter.as_mut(), observer: &mut observer, token: &token },
    );
    observer.finish();

    match result {
        Ok(outcome) => {
            print_outcome(&ctx.root, &outcome);
            Ok(())
        }
        Err(ExportError::Cancelled) => {
            print_cancelled();
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
