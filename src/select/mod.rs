//! Selection engine: one include/exclude verdict per path.
//!
//! Combines the rule set with the interactive override protocol. With
//! prompting disabled the engine is a pure function of path and rules.

pub mod prompt;

pub use prompt::{NoPrompter, OverrideChoice, Prompter, ScriptedPrompter, UserChoiceCache};

use crate::domain::PathEntry;
use crate::rules::RuleSet;
use crate::utils::parent_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Include,
    Exclude,
}

/// Tri-state outcome before any interactive resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Include,
    Exclude,
    Ask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    NotIgnored,
    /// Raw text of the ignore rule that fired.
    Ignored(String),
    /// Raw text of the include rule that matched.
    Included(String),
    /// Include rules are active and none matched.
    NotIncluded,
    /// Ignored but included; the user must decide.
    IgnoredButIncluded { ignore_rule: String, include_rule: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDecision {
    pub outcome: Outcome,
    pub reason: Reason,
}

/// Selection state for a single export operation.
///
/// Owns the run's [`UserChoiceCache`]; never share one engine between two
/// export operations.
pub struct SelectionEngine<'a> {
    rules: &'a RuleSet,
    prompter: &'a mut dyn Prompter,
    cache: UserChoiceCache,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(rules: &'a RuleSet, prompter: &'a mut dyn Prompter) -> Self {
        Self { rules, prompter, cache: UserChoiceCache::default() }
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    pub fn cache(&self) -> &UserChoiceCache {
        &self.cache
    }

    /// Start a new export run: forget every memoized answer.
    pub fn begin_run(&mut self) {
        self.cache.clear();
    }

    /// Classify `entry` without side effects.
    pub fn evaluate(
        &self,
        entry: &PathEntry,
        apply_include_rules: bool,
        allow_prompt: bool,
    ) -> SelectionDecision {
        let path = entry.relative_path.as_str();
        let ignore_rule =
            self.rules.ignore_match(path, entry.is_dir()).filter(|p| !p.is_negated());

        if apply_include_rules && self.rules.has_include_rules() {
            let Some(include_rule) = self.rules.include_match(path) else {
                return SelectionDecision {
                    outcome: Outcome::Exclude,
                    reason: Reason::NotIncluded,
                };
            };
            return match ignore_rule {
                Some(ignore_rule) if allow_prompt => SelectionDecision {
                    outcome: Outcome::Ask,
                    reason: Reason::IgnoredButIncluded {
                        ignore_rule: ignore_rule.raw().to_string(),
                        include_rule: include_rule.raw().to_string(),
                    },
                },
                _ => SelectionDecision {
                    outcome: Outcome::Include,
                    reason: Reason::Included(include_rule.raw().to_string()),
                },
            };
        }

        match ignore_rule {
            Some(rule) => SelectionDecision {
                outcome: Outcome::Exclude,
                reason: Reason::Ignored(rule.raw().to_string()),
            },
            None => SelectionDecision { outcome: Outcome::Include, reason: Reason::NotIgnored },
        }
    }

    /// Final verdict for `entry`, prompting for ignored-but-included paths
    /// when `allow_prompt` is set.
    pub fn decide(
        &mut self,
        entry: &PathEntry,
        apply_include_rules: bool,
        allow_prompt: bool,
    ) -> Verdict {
        let decision = self.evaluate(entry, apply_include_rules, allow_prompt);
        tracing::debug!(
            path = %entry.relative_path,
            outcome = ?decision.outcome,
            reason = ?decision.reason,
            "selection decision"
        );

        match decision.outcome {
            Outcome::Include => Verdict::Include,
            Outcome::Exclude => Verdict::Exclude,
            Outcome::Ask => {
                let choice = self.resolve_override(&entry.relative_path);
                if choice.approves() {
                    tracing::debug!(
                        "Processing {} (user approved ignored but included file)",
                        entry.relative_path
                    );
                    Verdict::Include
                } else {
                    tracing::debug!(
                        "Skipping {} (user rejected ignored but included file)",
                        entry.relative_path
                    );
                    Verdict::Exclude
                }
            }
        }
    }

    /// Whether `entry` shows up in the structure tree at all.
    ///
    /// Ignore-only check, never prompts. An ignored path stays visible when an
    /// include rule matches the path itself; for directories that is what
    /// decides whether the walk descends.
    pub fn is_visible(&mut self, entry: &PathEntry) -> bool {
        self.decide(entry, false, false) == Verdict::Include
            || self.rules.is_included(&entry.relative_path)
    }

    /// Verdict for a path the user explicitly asked to export (open files).
    ///
    /// Paths the rules exclude are included silently when `allow_ignored` is
    /// set; otherwise the user is asked, and a "to all" answer applies to the
    /// rest of the run.
    pub fn decide_explicit(&mut self, entry: &PathEntry, allow_ignored: bool) -> Verdict {
        match self.evaluate(entry, true, !allow_ignored).outcome {
            Outcome::Include => return Verdict::Include,
            Outcome::Ask => return self.decide(entry, true, true),
            Outcome::Exclude => {}
        }
        if allow_ignored {
            tracing::debug!("Including excluded open file {}", entry.relative_path);
            return Verdict::Include;
        }

        let choice = match self.cache.run() {
            Some(choice) => choice,
            None => {
                let prompt = format!("{} is ignored. Process it?", entry.relative_path);
                let choice = self
                    .prompter
                    .ask(&prompt, &OverrideChoice::RUN_LABELS)
                    .and_then(OverrideChoice::from_index)
                    .unwrap_or(OverrideChoice::No);
                if choice.is_sticky() {
                    self.cache.remember_run(choice);
                }
                choice
            }
        };

        if choice.approves() {
            Verdict::Include
        } else {
            Verdict::Exclude
        }
    }

    /// Yes/no question through the run's prompter. No answer means no.
    pub fn confirm(&mut self, prompt: &str) -> bool {
        self.prompter.confirm(prompt).unwrap_or(false)
    }

    fn resolve_override(&mut self, relative_path: &str) -> OverrideChoice {
        let dir = parent_dir(relative_path);
        if let Some(choice) = self.cache.directory(dir) {
            tracing::debug!("Reusing cached answer {:?} for directory '{}'", choice, dir);
            return choice;
        }

        let prompt = format!("{relative_path} is ignored but included. Process it?");
        let choice = self
            .prompter
            .ask(&prompt, &OverrideChoice::DIRECTORY_LABELS)
            .and_then(OverrideChoice::from_index)
            .unwrap_or(OverrideChoice::No);

        if choice.is_sticky() {
            self.cache.remember_directory(dir, choice);
        }
        choice
    }
}
