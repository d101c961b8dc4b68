//! Shared helpers: text decoding, path normalization, and name ordering.

pub mod encoding;
pub mod paths;
pub mod sort;

pub use encoding::{decode_text, is_binary_bytes, read_text};
pub use paths::{extension, file_name, normalize_path, parent_dir, relative_posix};
pub use sort::natural_cmp;
