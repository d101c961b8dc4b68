//! Shell completion generation

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    generate(args.shell, &mut command, bin_name, &mut std::io::stdout());
    Ok(())
}
