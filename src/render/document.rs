//! Markdown document model and rendering.

pub const STRUCTURE_HEADING: &str = "# Project Structure";
pub const ACTIVE_TABS_HEADING: &str = "# Active Tabs Content";
pub const SELECTION_HEADING: &str = "# Selected Files Content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Fenced file content; `language` is the extension without the dot.
    Content { language: String, text: String },
    TooLarge { size: u64 },
    Binary,
    Unreadable { error: String },
}

/// One exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    pub relative_path: String,
    pub body: SectionBody,
}

impl FileSection {
    pub fn render(&self) -> String {
        let path = &self.relative_path;
        match &self.body {
            SectionBody::Content { language, text } => {
                format!("## {path}\n\n```{language}\n{}\n```\n\n", text.trim_end())
            }
            SectionBody::TooLarge { size } => {
                format!("## {path}\n\nFile is too large to process ({size} bytes)\n\n")
            }
            SectionBody::Binary => format!("## {path}\n\nBinary file skipped\n\n"),
            SectionBody::Unreadable { error } => {
                format!("## {path}\n\nFile could not be read: {error}\n\n")
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !matches!(self.body, SectionBody::Content { .. })
    }
}

/// A complete export, rendered in one pass at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocument {
    pub description: Option<String>,
    pub structure: Option<Vec<String>>,
    /// Heading placed before the file sections, if any.
    pub heading: Option<&'static str>,
    pub sections: Vec<FileSection>,
}

impl ExportDocument {
    /// Blocks are joined with a single newline.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.sections.len() + 3);
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            parts.push(format!("{description}\n\n"));
        }
        if let Some(lines) = &self.structure {
            parts.push(render_structure(lines));
        }
        if let Some(heading) = self.heading {
            parts.push(format!("{heading}\n\n"));
        }
        parts.extend(self.sections.iter().map(FileSection::render));
        parts.join("\n")
    }
}

pub fn render_structure(lines: &[String]) -> String {
    format!("{STRUCTURE_HEADING}\n\n```\n{}\n```\n\n", lines.join("\n"))
}
