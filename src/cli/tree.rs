//! Structure preview command

use anyhow::Result;
use clap::Args;

use super::prompt::prompter;
use super::utils::{cancel_on_interrupt, print_cancelled, ProjectArgs};
use crate::config::ConfigOverrides;
use crate::error::ExportError;
use crate::export::visible_tree;

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// List the files an export would process instead of the tree
    #[arg(long)]
    pub files: bool,
}

pub fn run(args: TreeArgs, assume_yes: bool) -> Result<()> {
    let ctx = args.project.load(&ConfigOverrides::default())?;
    let mut prompter = prompter(assume_yes, None);
    let token = cancel_on_interrupt();

    let out = match visible_tree(&ctx, prompter.as_mut(), &token) {
        Ok(out) => out,
        Err(ExportError::Cancelled) => {
            print_cancelled();
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.files {
        for entry in &out.files_to_process {
            println!("{}", entry.relative_path);
        }
    } else {
        for line in &out.tree_lines {
            println!("{line}");
        }
    }
    Ok(())
}
