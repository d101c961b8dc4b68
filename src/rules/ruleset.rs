//! Ordered, layered collection of ignore and include rules.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_IGNORE_PATTERNS;
use super::pattern::{Pattern, Provenance};
use crate::error::{ExportError, Result};

/// Inputs for one rule-set build, in precedence order.
#[derive(Debug, Clone, Default)]
pub struct RuleSources {
    pub global_ignore: Vec<String>,
    pub global_include: Vec<String>,
    /// Project ignore-rule file; a missing file contributes nothing.
    pub ignore_file: Option<PathBuf>,
    /// Project include-rule file; a missing file contributes nothing.
    pub include_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    ignore: Vec<Pattern>,
    include: Vec<Pattern>,
}

impl RuleSet {
    /// Build the rule set for `root`: built-in defaults, then global rules,
    /// then the project's rule files.
    pub fn build(root: &Path, sources: &RuleSources) -> Result<Self> {
        let mut builder = RuleSetBuilder::new(root);
        builder
            .add_ignore_lines(DEFAULT_IGNORE_PATTERNS.iter().copied(), Provenance::BuiltinDefault)?
            .add_ignore_lines(
                sources.global_ignore.iter().map(String::as_str),
                Provenance::GlobalConfig,
            )?
            .add_include_lines(
                sources.global_include.iter().map(String::as_str),
                Provenance::GlobalConfig,
            )?;
        if let Some(path) = &sources.ignore_file {
            builder.add_ignore_file(path)?;
        }
        if let Some(path) = &sources.include_file {
            builder.add_include_file(path)?;
        }
        let rules = builder.build();
        tracing::debug!(
            ignore = rules.ignore.len(),
            include = rules.include.len(),
            "rule set built"
        );
        Ok(rules)
    }

    /// Last matching ignore rule, if any. The path is ignored when this rule
    /// exists and is not a negation.
    pub fn ignore_match(&self, relative_path: &str, is_dir: bool) -> Option<&Pattern> {
        self.ignore.iter().rev().find(|p| p.matches(relative_path, is_dir))
    }

    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.ignore_match(relative_path, is_dir).is_some_and(|p| !p.is_negated())
    }

    /// First include rule matching the path, if any.
    pub fn include_match(&self, relative_path: &str) -> Option<&Pattern> {
        self.include.iter().find(|p| p.matches(relative_path, false))
    }

    /// True iff include rules exist and at least one matches.
    pub fn is_included(&self, relative_path: &str) -> bool {
        self.include_match(relative_path).is_some()
    }

    pub fn has_include_rules(&self) -> bool {
        !self.include.is_empty()
    }

    pub fn ignore_patterns(&self) -> &[Pattern] {
        &self.ignore
    }

    pub fn include_patterns(&self) -> &[Pattern] {
        &self.include
    }
}

/// Incremental construction for callers that layer their own sources.
pub struct RuleSetBuilder {
    root: PathBuf,
    ignore: Vec<Pattern>,
    include: Vec<Pattern>,
}

impl RuleSetBuilder {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf(), ignore: Vec::new(), include: Vec::new() }
    }

    pub fn add_ignore_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
        provenance: Provenance,
    ) -> Result<&mut Self> {
        for line in lines {
            if let Some(pattern) = Pattern::ignore(line, provenance.clone())? {
                self.ignore.push(pattern);
            }
        }
        Ok(self)
    }

    pub fn add_include_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
        provenance: Provenance,
    ) -> Result<&mut Self> {
        for line in lines {
            if let Some(pattern) = Pattern::include(line, provenance.clone(), &self.root)? {
                self.include.push(pattern);
            }
        }
        Ok(self)
    }

    pub fn add_ignore_file(&mut self, path: &Path) -> Result<&mut Self> {
        if let Some(content) = read_rule_file(path)? {
            self.add_ignore_lines(content.lines(), Provenance::ProjectFile(path.to_path_buf()))?;
            tracing::debug!("Custom ignore rules added from: {}", path.display());
        }
        Ok(self)
    }

    pub fn add_include_file(&mut self, path: &Path) -> Result<&mut Self> {
        if let Some(content) = read_rule_file(path)? {
            self.add_include_lines(content.lines(), Provenance::ProjectFile(path.to_path_buf()))?;
            tracing::debug!("Custom include rules added from: {}", path.display());
        }
        Ok(self)
    }

    pub fn build(self) -> RuleSet {
        RuleSet { ignore: self.ignore, include: self.include }
    }
}

fn read_rule_file(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| ExportError::Config {
            path: path.to_path_buf(),
            message: "rule file is not valid UTF-8".to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ExportError::read(path, e)),
    }
}
