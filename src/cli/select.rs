//! Interactive file selection and export

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, MultiSelect};

use super::progress::ProgressObserver;
use super::prompt::{is_interactive, prompter};
use super::utils::{
    cancel_on_interrupt, print_cancelled, print_outcome, OutputArgs, ProjectArgs,
};
use crate::error::ExportError;
use crate::export::{
    expand_selection, export_selection, visible_tree, ExportHooks, SavedSelection, SelectionStore,
};
use crate::utils::file_name;

#[derive(Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Start from an empty selection instead of the saved one
    #[arg(long)]
    pub reset: bool,

    /// Do not remember this selection
    #[arg(long)]
    pub no_save: bool,
}

pub fn run(args: SelectArgs, assume_yes: bool) -> Result<()> {
    if !is_interactive() {
        anyhow::bail!("`select` needs an interactive terminal; use `files` to export a fixed list");
    }

    let ctx = args.project.load(&args.output.overrides())?;
    let store = SelectionStore::new(&ctx.root);
    let saved = if args.reset { SavedSelection::default() } else { store.load()? };

    let token = cancel_on_interrupt();
    let mut tree_prompter = prompter(assume_yes, None);
    let tree = match visible_tree(&ctx, tree_prompter.as_mut(), &token) {
        Ok(tree) => tree,
        Err(ExportError::Cancelled) => {
            print_cancelled();
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let labels: Vec<String> = tree
        .entries
        .iter()
        .map(|e| {
            let depth = e.relative_path.matches('/').count();
            let suffix = if e.is_dir() { "/" } else { "" };
            format!("{}{}{}", "  ".repeat(depth), file_name(&e.relative_path), suffix)
        })
        .collect();
    let defaults: Vec<bool> =
        tree.entries.iter().map(|e| saved.files.contains(&e.relative_path)).collect();

    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select files and folders to export (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()
        .context("Selection prompt failed")?;

    let Some(picked) = picked else {
        print_cancelled();
        return Ok(());
    };
    let picked: Vec<String> = picked
        .into_iter()
        .filter_map(|idx| tree.entries.get(idx))
        .map(|e| e.relative_path.clone())
        .collect();
    let files = expand_selection(&tree.entries, &picked);
    if files.is_empty() {
        return Err(ExportError::NothingToExport.into());
    }

    let mut observer = ProgressObserver::new();
    let mut prompter = prompter(assume_yes, Some(observer.bar()));
    let result = export_selection(
        &ctx,
        &files,
        ExportHooks { prompter: prompter.as_mut(), observer: &mut observer, token: &token },
    );
    observer.finish();

    match result {
        Ok(outcome) => {
            if !args.no_save {
                store.save(&SavedSelection { files: picked })?;
            }
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
