//! Plain-text processing: whitespace normalization and scene splitting.

mod normalize;
mod splitter;

pub use normalize::{collapse_runs, normalize};
pub use splitter::split_scenes;
