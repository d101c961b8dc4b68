//! dir2file: export a project directory into a single Markdown file.

use anyhow::Result;

fn main() -> Result<()> {
    dir2file::cli::run()
}
