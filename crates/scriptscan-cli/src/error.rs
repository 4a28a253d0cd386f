//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` and `PathError` to exit codes and user-facing messages.

use std::path::PathBuf;

use scriptscan_core::{CoreError, ModelError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// The workspace has not been provisioned.
    #[error("Environment not found at {}. Run \"scriptscan setup\" first.", .0.display())]
    WorkspaceNotFound(PathBuf),

    /// Input data is unusable (e.g. no training examples).
    #[error("Invalid data: {0}")]
    Data(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Process(_) => 71,  // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::WorkspaceNotFound(_) | Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::WorkspaceNotFound(path) => Self::WorkspaceNotFound(path),
            PathError::EmptyPath | PathError::CurrentDirError(_) => Self::Config(err.to_string()),
            other => Self::Io(other.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Path(path_err) => path_err.into(),
            CoreError::Model(ModelError::NoTrainingData(dir)) => {
                Self::Data(format!("no training data found in {}", dir.display()))
            }
            CoreError::Extraction(e) => Self::Data(e.to_string()),
            CoreError::Settings(e) => Self::Config(e.to_string()),
            CoreError::Configuration(msg) => Self::Config(msg),
            other => Self::Core(other.to_string()),
        }
    }
}

impl From<ModelError> for CliError {
    fn from(err: ModelError) -> Self {
        CoreError::Model(err).into()
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_workspace_is_a_config_error() {
        let err = CliError::from(CoreError::Path(PathError::WorkspaceNotFound(PathBuf::from(
            "/srv/.scriptscan",
        ))));

        assert_eq!(err.exit_code(), 78);
        assert_eq!(
            err.to_string(),
            "Environment not found at /srv/.scriptscan. Run \"scriptscan setup\" first."
        );
    }

    #[test]
    fn empty_training_data_is_a_data_error() {
        let err = CliError::from(CoreError::Model(ModelError::NoTrainingData(PathBuf::from(
            "data",
        ))));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn anyhow_errors_keep_their_exit_code() {
        let err = anyhow::Error::new(CliError::Config("bad".to_string()));
        assert_eq!(exit_code_for(&err), 78);
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}
