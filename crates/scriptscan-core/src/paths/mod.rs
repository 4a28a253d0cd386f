//! Workspace path utilities.
//!
//! - Resolves the workspace root from `--home`, `SCRIPTSCAN_HOME` or the
//!   current directory
//! - Returns `PathBuf` and `PathError`; no terminal I/O here, adapters
//!   handle prompts and messages

mod config;
mod ensure;
mod error;
mod resolver;
mod workspace;

#[cfg(test)]
mod test_utils;

pub use error::PathError;

pub use workspace::{DEFAULT_WORKSPACE_DIR, HOME_ENV_VAR, HomeSource, WorkspaceLayout};

// Directory operations
pub use ensure::{DirectoryCreationStrategy, DirectoryStatus, ensure_directory, verify_writable};

// `.env` persistence
pub use config::{persist_env_value, read_env_value};

pub use resolver::ResolvedPaths;
