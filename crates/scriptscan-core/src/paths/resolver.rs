//! Resolved workspace paths for CLI introspection (`scriptscan paths`).

use std::fmt;
use std::path::{Path, PathBuf};

use super::{HomeSource, PathError, WorkspaceLayout};

/// All workspace paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub workspace: PathBuf,
    pub workspace_source: HomeSource,
    pub provisioned: bool,
    pub lexicon_path: PathBuf,
    pub model_path: PathBuf,
    pub data_dir: PathBuf,
    pub env_file: PathBuf,
}

impl ResolvedPaths {
    /// Resolve paths using `--home` (if any) and the current environment.
    pub fn resolve(explicit_home: Option<&Path>) -> Result<Self, PathError> {
        Ok(Self::from_layout(&WorkspaceLayout::resolve(explicit_home)?))
    }

    pub fn from_layout(layout: &WorkspaceLayout) -> Self {
        Self {
            workspace: layout.root().to_path_buf(),
            workspace_source: layout.source(),
            provisioned: layout.is_provisioned(),
            lexicon_path: layout.lexicon_path(),
            model_path: layout.model_path(),
            data_dir: layout.data_dir(),
            env_file: layout.env_file(),
        }
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "workspace = {}", self.workspace.display())?;
        writeln!(f, "workspace_source = {:?}", self.workspace_source)?;
        writeln!(f, "provisioned = {}", self.provisioned)?;
        writeln!(f, "lexicon_path = {}", self.lexicon_path.display())?;
        writeln!(f, "model_path = {}", self.model_path.display())?;
        writeln!(f, "data_dir = {}", self.data_dir.display())?;
        write!(f, "env_file = {}", self.env_file.display())
    }
}
