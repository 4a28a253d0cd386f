//! Model acquisition port.
//!
//! Provisioning asks a `ModelSource` for the entity model when none is
//! installed. The HTTP implementation lives in the CLI crate.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a model artifact.
#[derive(Debug, Error)]
pub enum ModelSourceError {
    /// The remote end could not be reached or answered with an error.
    #[error("Download failed: {0}")]
    Transfer(String),

    /// The artifact could not be written to disk.
    #[error("Failed to write model: {0}")]
    Io(String),
}

/// Port for fetching an entity model into the workspace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// Where the model comes from, for status output.
    fn describe(&self) -> String;

    /// Write the model to `dest`, returning the number of bytes written.
    async fn fetch(&self, dest: &Path) -> Result<u64, ModelSourceError>;
}
