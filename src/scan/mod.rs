//! Project directory walking.

pub mod tree;

pub use tree::{walk, WalkOptions, WalkOutput};
