//! Progress bar observer.

use indicatif::{ProgressBar, ProgressStyle};

use crate::render::ExportObserver;

pub struct ProgressObserver {
    bar: ProgressBar,
    warnings: usize,
}

impl ProgressObserver {
    /// Visible only when stderr is a terminal.
    pub fn new() -> Self {
        let bar = if super::prompt::is_interactive() {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar, warnings: 0 }
    }

    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportObserver for ProgressObserver {
    fn on_progress(&mut self, done: usize, total: usize, path: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        if self.warnings > 0 {
            self.bar.set_message(format!("Processing: {path} ({} warnings)", self.warnings));
        } else {
            self.bar.set_message(format!("Processing: {path}"));
        }
    }

    // Details are logged through tracing and summarized after the export.
    fn on_warning(&mut self, _message: &str) {
        self.warnings += 1;
    }
}
