//! Directory creation and verification utilities.
//!
//! `DirectoryCreationStrategy` has no interactive variant; adapters that
//! want to prompt do so themselves and then pick `AutoCreate` or `Disallow`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::error::PathError;

const WRITE_PROBE: &str = ".scriptscan_write_test";

/// How to handle a missing directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryCreationStrategy {
    /// Create the directory (and parents) if it is missing.
    #[default]
    AutoCreate,
    /// Fail with [`PathError::DirectoryNotFound`] if it is missing.
    Disallow,
}

/// Outcome of [`ensure_directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Created,
    AlreadyPresent,
}

/// Ensure `path` exists as a writable directory.
pub fn ensure_directory(
    path: &Path,
    strategy: DirectoryCreationStrategy,
) -> Result<DirectoryStatus, PathError> {
    let status = if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        DirectoryStatus::AlreadyPresent
    } else {
        match strategy {
            DirectoryCreationStrategy::AutoCreate => {
                fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                DirectoryStatus::Created
            }
            DirectoryCreationStrategy::Disallow => {
                return Err(PathError::DirectoryNotFound(path.to_path_buf()));
            }
        }
    };

    verify_writable(path)?;
    Ok(status)
}

/// Verify a directory is writable by creating and removing a probe file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(WRITE_PROBE);
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    file.write_all(b"ok").map_err(not_writable)?;
    drop(file);
    let _ = fs::remove_file(&probe);
    Ok(())
}
