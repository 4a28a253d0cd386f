//! CLI bootstrap - the composition root.
//!
//! Resolves the workspace once; command handlers receive the resulting
//! `CliContext` and build the services they need from it.

use std::path::PathBuf;

use anyhow::Result;
use scriptscan_core::paths::WorkspaceLayout;
use tracing::{debug, warn};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Workspace override from `--home` or `SCRIPTSCAN_HOME`.
    pub home: Option<PathBuf>,
}

impl CliConfig {
    pub const fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }
}

/// Context shared by command handlers.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub layout: WorkspaceLayout,
}

impl CliContext {
    /// Fail with the "run setup first" error unless the workspace exists.
    pub fn require_workspace(&self) -> Result<(), CliError> {
        self.layout.require_provisioned().map_err(CliError::from)
    }

    /// Load the workspace `.env` without overriding variables already set.
    ///
    /// Returns whether it was loaded. A malformed file is logged and ignored.
    pub fn load_workspace_env(&self) -> bool {
        let env_file = self.layout.env_file();
        if !env_file.is_file() {
            return false;
        }
        match dotenvy::from_path(&env_file) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    target: "scriptscan.paths",
                    path = %env_file.display(),
                    error = %e,
                    "Workspace .env could not be loaded; using flags, environment and defaults"
                );
                false
            }
        }
    }
}

/// Resolve the workspace. Does not require it to exist yet.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let layout = WorkspaceLayout::resolve(config.home.as_deref()).map_err(CliError::from)?;

    debug!(
        target: "scriptscan.paths",
        workspace = %layout.root().display(),
        source = ?layout.source(),
        "CLI bootstrap resolved workspace"
    );

    Ok(CliContext { layout })
}
