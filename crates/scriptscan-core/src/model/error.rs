use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while training, loading or saving an entity model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model file does not exist.
    #[error("Entity model not found at {0}")]
    NotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("Failed to access {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// The model file is not valid model JSON.
    #[error("Invalid entity model {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The model was written by an incompatible version.
    #[error("Unsupported entity model version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// No usable annotated examples were found.
    #[error("No training data found in {0}")]
    NoTrainingData(PathBuf),
}
