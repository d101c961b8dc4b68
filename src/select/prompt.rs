//! The "ask the user" capability consumed by the selection engine.

use std::collections::{HashMap, VecDeque};

/// Interactive question channel. Implementations must never block forever:
/// returning `None` means "no answer", which callers treat as the safe
/// negative outcome.
pub trait Prompter {
    /// Ask the user to pick one of `choices`; returns the chosen index.
    fn ask(&mut self, prompt: &str, choices: &[&str]) -> Option<usize>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str) -> Option<bool> {
        self.ask(prompt, &["Yes", "No"]).map(|idx| idx == 0)
    }
}

/// Answers every question with "no answer". Used when stdin is not a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompter;

impl Prompter for NoPrompter {
    fn ask(&mut self, prompt: &str, _choices: &[&str]) -> Option<usize> {
        tracing::debug!("No interactive terminal; declining: {}", prompt);
        None
    }
}

/// Replays a fixed sequence of answers and records every prompt it saw.
///
/// Answers are matched by choice label, so scripts stay readable. Once the
/// script runs out every further question gets no answer.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            asked: Vec::new(),
        }
    }

    /// Queue a dismissal (no answer) after the scripted answers.
    pub fn then_dismiss(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str, choices: &[&str]) -> Option<usize> {
        self.asked.push(prompt.to_string());
        let answer = self.answers.pop_front().flatten()?;
        choices.iter().position(|c| c.eq_ignore_ascii_case(&answer))
    }
}

/// Override answers for an ignored-but-included path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideChoice {
    Yes,
    No,
    YesToAll,
    NoToAll,
}

impl OverrideChoice {
    pub const DIRECTORY_LABELS: [&'static str; 4] =
        ["Yes", "No", "Yes to all in this directory", "No to all in this directory"];
    pub const RUN_LABELS: [&'static str; 4] = ["Yes", "No", "Yes to all", "No to all"];

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::Yes),
            1 => Some(Self::No),
            2 => Some(Self::YesToAll),
            3 => Some(Self::NoToAll),
            _ => None,
        }
    }

    pub fn approves(self) -> bool {
        matches!(self, Self::Yes | Self::YesToAll)
    }

    pub fn is_sticky(self) -> bool {
        matches!(self, Self::YesToAll | Self::NoToAll)
    }
}

/// Memoized "to all" answers for one export run.
///
/// Directory answers are keyed by the parent directory of the prompted path
/// (`""` for the root). The run-wide slot serves the open-files entry point.
#[derive(Debug, Default, Clone)]
pub struct UserChoiceCache {
    directories: HashMap<String, OverrideChoice>,
    run: Option<OverrideChoice>,
}

impl UserChoiceCache {
    pub fn clear(&mut self) {
        self.directories.clear();
        self.run = None;
    }

    pub fn directory(&self, dir: &str) -> Option<OverrideChoice> {
        self.directories.get(dir).copied()
    }

    pub fn remember_directory(&mut self, dir: &str, choice: OverrideChoice) {
        self.directories.insert(dir.to_string(), choice);
    }

    pub fn run(&self) -> Option<OverrideChoice> {
        self.run
    }

    pub fn remember_run(&mut self, choice: OverrideChoice) {
        self.run = Some(choice);
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.run.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_matches_labels_and_records_prompts() {
        let mut prompter = ScriptedPrompter::new(["no to all in this directory"]);
        let idx = prompter.ask("q1", &OverrideChoice::DIRECTORY_LABELS);
        assert_eq!(idx, Some(3));
        assert_eq!(prompter.ask("q2", &OverrideChoice::DIRECTORY_LABELS), None);
        assert_eq!(prompter.asked(), &["q1".to_string(), "q2".to_string()]);
    }

    #[test]
    fn test_confirm_maps_yes_and_no() {
        let mut prompter = ScriptedPrompter::new(["Yes", "No"]).then_dismiss();
        assert_eq!(prompter.confirm("a"), Some(true));
        assert_eq!(prompter.confirm("b"), Some(false));
        assert_eq!(prompter.confirm("c"), None);
    }

    #[test]
    fn test_cache_clear_forgets_everything() {
        let mut cache = UserChoiceCache::default();
        cache.remember_directory("src", OverrideChoice::YesToAll);
        cache.remember_run(OverrideChoice::NoToAll);
        assert_eq!(cache.directory("src"), Some(OverrideChoice::YesToAll));
        cache.clear();
        assert!(cache.is_empty());
    }
}
