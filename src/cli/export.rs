//! Export command implementation

use anyhow::Result;
use clap::Args;

use super::progress::ProgressObserver;
use super::prompt::prompter;
use super::utils::{
    cancel_on_interrupt, print_cancelled, print_outcome, OutputArgs, ProjectArgs,
};
use crate::error::ExportError;
use crate::export::{export_project, ExportHooks};

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: ExportArgs, assume_yes: bool) -> Result<()> {
    let ctx = args.project.load(&args.output.overrides())?;
    tracing::info!("Exporting {}", ctx.root.display());

    let mut observer = ProgressObserver::new();
    let mut prompter = prompter(assume_yes, Some(observer.bar()));
    let token = cancel_on_interrupt();

    let result = export_project(
        &ctx,
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
