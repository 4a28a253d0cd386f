//! Port definitions (trait abstractions) for pluggable components.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP client or server types in any signature
//! - Recognizers are synchronous and CPU-bound; callers decide where they run
//! - Model acquisition is async because it usually involves the network

pub mod model_source;
pub mod recognizer;

use thiserror::Error;

pub use model_source::{ModelSource, ModelSourceError};
pub use recognizer::{EntityRecognizer, NoopRecognizer};

use crate::analysis::LexiconError;
use crate::extract::ExtractError;
use crate::model::ModelError;
use crate::paths::PathError;
use crate::settings::SettingsError;

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document text extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    /// Workspace path resolution or creation failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Lexicon file could not be read or written.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    /// Entity model could not be trained, read or written.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Server settings are unreadable or invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
