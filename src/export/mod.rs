//! Export pipeline: rules, walk, assembly, and the atomic write.
//!
//! Every entry point follows the same order: build the rule set, start a
//! fresh selection run, collect files, assemble sections, render once and
//! write. Nothing touches the output file before the document is complete.

pub mod description;
pub mod output;
pub mod selection;

pub use description::resolve_description;
pub use output::{ensure_output_dir, write_atomic};
pub use selection::{expand_selection, SavedSelection, SelectionStore, SELECTION_FILE};

use std::path::{Path, PathBuf};

use crate::cancel::CancellationToken;
use crate::config::{load_export_config, load_global_config, ConfigOverrides};
use crate::domain::{EntryPoint, ExportConfig, GlobalConfig, PathEntry};
use crate::error::Result;
use crate::render::{
    assemble, AssembleOptions, BuiltinStripper, CommentStripper, DecisionMode, ExportDocument,
    ExportObserver, ACTIVE_TABS_HEADING, SELECTION_HEADING,
};
use crate::rules::{RuleSet, RuleSources};
use crate::scan::{walk, WalkOptions, WalkOutput};
use crate::select::{Prompter, SelectionEngine};
use crate::utils::{normalize_path, relative_posix};

/// Everything an export needs to know about one project.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub root: PathBuf,
    pub config: ExportConfig,
    pub global: GlobalConfig,
}

impl ExportContext {
    pub fn new(root: impl Into<PathBuf>, config: ExportConfig, global: GlobalConfig) -> Self {
        Self { root: root.into(), config, global }
    }

    /// Load project and global configuration, then apply command-line
    /// overrides.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        global_config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let config = overrides.apply(load_export_config(root, config_path)?);
        let global = load_global_config(global_config_path)?;
        Ok(Self::new(root, config, global))
    }

    pub fn rule_sources(&self) -> RuleSources {
        RuleSources {
            global_ignore: self.global.global_ignore_rules.clone(),
            global_include: self.global.global_include_rules.clone(),
            ignore_file: Some(self.root.join(&self.config.ignore_file)),
            include_file: Some(self.root.join(&self.config.include_file)),
        }
    }

    pub fn build_rules(&self) -> Result<RuleSet> {
        RuleSet::build(&self.root, &self.rule_sources())
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output)
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions { large_tree_threshold: self.config.large_tree_threshold }
    }

    fn stripper(&self) -> Option<BuiltinStripper> {
        self.config
            .remove_comments
            .then(|| BuiltinStripper::new(&self.global.strip_comments_from_extensions))
    }

    /// Paths the tool itself writes; never exported.
    fn owned_paths(&self) -> Vec<String> {
        let mut owned = vec![SELECTION_FILE.to_string()];
        if let Some(rel) = relative_posix(&self.root, &self.output_path()) {
            owned.push(rel);
        }
        owned
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub output_path: PathBuf,
    pub files_exported: usize,
    pub placeholders: usize,
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

/// Interactive and reporting hooks for one export run.
pub struct ExportHooks<'h> {
    pub prompter: &'h mut dyn Prompter,
    pub observer: &'h mut dyn ExportObserver,
    pub token: &'h CancellationToken,
}

/// Export the whole project.
pub fn export_project(ctx: &ExportContext, hooks: ExportHooks<'_>) -> Result<ExportOutcome> {
    let ExportHooks { prompter, observer, token } = hooks;
    let rules = ctx.build_rules()?;
    let mut engine = SelectionEngine::new(&rules, prompter);
    engine.begin_run();

    let WalkOutput { tree_lines, files_to_process, warnings: walk_warnings, .. } =
        walk(&ctx.root, &mut engine, token, &ctx.walk_options())?;

    let owned = ctx.owned_paths();
    let files: Vec<PathEntry> =
        files_to_process.into_iter().filter(|e| !owned.contains(&e.relative_path)).collect();

    let document = ExportDocument {
        description: resolve_description(&ctx.root, &ctx.config, EntryPoint::Main),
        structure: ctx.config.include_project_structure.then_some(tree_lines),
        heading: None,
        sections: Vec::new(),
    };
    let run = Run { engine: &mut engine, observer, token, warnings: walk_warnings };
    finish(ctx, run, document, &files, DecisionMode::Walk)
}

/// Export an explicit list of files, such as the editor's open tabs.
///
/// Paths may be absolute or relative to the project root. Paths outside the
/// root or missing on disk are reported and skipped.
pub fn export_files(
    ctx: &ExportContext,
    paths: &[PathBuf],
    hooks: ExportHooks<'_>,
) -> Result<ExportOutcome> {
    let ExportHooks { prompter, observer, token } = hooks;
    let rules = ctx.build_rules()?;
    let mut engine = SelectionEngine::new(&rules, prompter);
    engine.begin_run();

    let mut warnings = Vec::new();
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match explicit_entry(&ctx.root, path) {
            Some(entry) => files.push(entry),
            None => {
                let message = format!("Skipping {}: not a file inside the project", path.display());
                tracing::warn!("{}", message);
                observer.on_warning(&message);
                warnings.push(message);
            }
        }
    }

    let structure = structure_lines(ctx, &mut engine, token, &mut warnings)?;
    let document = ExportDocument {
        description: resolve_description(&ctx.root, &ctx.config, EntryPoint::ActiveTabs),
        structure,
        heading: Some(ACTIVE_TABS_HEADING),
        sections: Vec::new(),
    };
    let mode = DecisionMode::Explicit { allow_ignored: ctx.config.allow_ignored_on_tabs_export };
    let run = Run { engine: &mut engine, observer, token, warnings };
    finish(ctx, run, document, &files, mode)
}

/// Export files the user picked interactively (relative paths).
pub fn export_selection(
    ctx: &ExportContext,
    selected: &[String],
    hooks: ExportHooks<'_>,
) -> Result<ExportOutcome> {
    let ExportHooks { prompter, observer, token } = hooks;
    let rules = ctx.build_rules()?;
    let mut engine = SelectionEngine::new(&rules, prompter);
    engine.begin_run();

    let mut warnings = Vec::new();
    let structure = structure_lines(ctx, &mut engine, token, &mut warnings)?;

    let files: Vec<PathEntry> =
        selected.iter().map(|p| PathEntry::file(normalize_path(p), None)).collect();
    let document = ExportDocument {
        description: resolve_description(&ctx.root, &ctx.config, EntryPoint::Selection),
        structure,
        heading: Some(SELECTION_HEADING),
        sections: Vec::new(),
    };
    let run = Run { engine: &mut engine, observer, token, warnings };
    finish(ctx, run, document, &files, DecisionMode::Chosen)
}

/// Walk the project with the current rules. Never writes anything.
pub fn visible_tree(
    ctx: &ExportContext,
    prompter: &mut dyn Prompter,
    token: &CancellationToken,
) -> Result<WalkOutput> {
    let rules = ctx.build_rules()?;
    let mut engine = SelectionEngine::new(&rules, prompter);
    engine.begin_run();
    let mut out = walk(&ctx.root, &mut engine, token, &ctx.walk_options())?;
    let owned = ctx.owned_paths();
    out.files_to_process.retain(|e| !owned.contains(&e.relative_path));
    Ok(out)
}

/// Per-run state handed from an entry point to [`finish`].
struct Run<'r, 'a> {
    engine: &'r mut SelectionEngine<'a>,
    observer: &'r mut dyn ExportObserver,
    token: &'r CancellationToken,
    warnings: Vec<String>,
}

fn structure_lines(
    ctx: &ExportContext,
    engine: &mut SelectionEngine<'_>,
    token: &CancellationToken,
    warnings: &mut Vec<String>,
) -> Result<Option<Vec<String>>> {
    if !ctx.config.include_project_structure {
        return Ok(None);
    }
    let out = walk(&ctx.root, engine, token, &ctx.walk_options())?;
    warnings.extend(out.warnings);
    Ok(Some(out.tree_lines))
}

fn finish(
    ctx: &ExportContext,
    run: Run<'_, '_>,
    mut document: ExportDocument,
    files: &[PathEntry],
    mode: DecisionMode,
) -> Result<ExportOutcome> {
    let Run { engine, observer, token, mut warnings } = run;
    let stripper = ctx.stripper();
    let options = AssembleOptions {
        root: &ctx.root,
        max_file_size: ctx.config.max_file_size,
        stripper: stripper.as_ref().map(|s| s as &dyn CommentStripper),
        mode,
    };
    let assembled = assemble(files, engine, &options, observer, token)?;
    warnings.extend(assembled.warnings);

    let placeholders = assembled.sections.iter().filter(|s| s.is_placeholder()).count();
    let files_exported = assembled.sections.len();
    document.sections = assembled.sections;
    let content = document.render();

    token.check()?;
    let output_path = ctx.output_path();
    ensure_output_dir(&output_path, engine)?;
    write_atomic(&output_path, &content)?;

    Ok(ExportOutcome {
        output_path,
        files_exported,
        placeholders,
        skipped: assembled.skipped,
        warnings,
    })
}

fn explicit_entry(root: &Path, path: &Path) -> Option<PathEntry> {
    let full = if path.is_absolute() { path.to_path_buf() } else { root.join(path) };
    // Canonical forms resolve `..` and symlinks before the containment check.
    let full = full.canonicalize().ok()?;
    let meta = std::fs::metadata(&full).ok().filter(|m| m.is_file())?;
    let relative = relative_posix(&root.canonicalize().ok()?, &full)?;
    (!relative.is_empty()).then(|| PathEntry::file(relative, Some(meta.len())))
}
