//! Markdown export rendering.

pub mod assembler;
pub mod comments;
pub mod document;

pub use assembler::{
    assemble, AssembleOptions, AssembledFiles, DecisionMode, ExportObserver, NullObserver,
};
pub use comments::{BuiltinStripper, CommentStripper, DEFAULT_STRIP_EXTENSIONS};
pub use document::{
    render_structure, ExportDocument, FileSection, SectionBody, ACTIVE_TABS_HEADING,
    SELECTION_HEADING, STRUCTURE_HEADING,
};
