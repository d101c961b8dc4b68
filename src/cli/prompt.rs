//! Terminal prompts.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Select};
use indicatif::ProgressBar;

use crate::select::{NoPrompter, Prompter};

/// Asks through a `dialoguer` menu. Escape or `q` dismisses the question.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    /// Hidden while a question is on screen.
    bar: Option<ProgressBar>,
}

impl DialoguerPrompter {
    pub fn new(bar: Option<ProgressBar>) -> Self {
        Self { theme: ColorfulTheme::default(), bar }
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, prompt: &str, choices: &[&str]) -> Option<usize> {
        let theme = &self.theme;
        let ask = || {
            Select::with_theme(theme).with_prompt(prompt).items(choices).default(0).interact_opt()
        };
        let answer = match &self.bar {
            Some(bar) => bar.suspend(ask),
            None => ask(),
        };
        match answer {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Prompt failed: {}", e);
                None
            }
        }
    }
}

/// Answers the first choice ("Yes") to everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct YesPrompter;

impl Prompter for YesPrompter {
    fn ask(&mut self, prompt: &str, _choices: &[&str]) -> Option<usize> {
        tracing::debug!("Assuming yes: {}", prompt);
        Some(0)
    }
}

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Pick the prompter for this invocation.
pub fn prompter(assume_yes: bool, bar: Option<ProgressBar>) -> Box<dyn Prompter> {
    if assume_yes {
        Box::new(YesPrompter)
    } else if is_interactive() {
        Box::new(DialoguerPrompter::new(bar))
    } else {
        Box::new(NoPrompter)
    }
}
