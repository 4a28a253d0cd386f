//! Workspace directory layout and resolution.
//!
//! The workspace holds everything the service needs at runtime:
//!
//! ```text
//! <root>/
//! ├── .env                 server settings written by `setup`
//! ├── lexicon.json         keyword dictionaries
//! ├── model/entities.json  trained entity model (optional)
//! └── data/                annotated training examples
//! ```

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the workspace location.
pub const HOME_ENV_VAR: &str = "SCRIPTSCAN_HOME";

/// Workspace directory name used when nothing else is configured.
pub const DEFAULT_WORKSPACE_DIR: &str = ".scriptscan";

/// How the workspace root was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSource {
    /// Passed explicitly (`--home`).
    Explicit,
    /// Taken from `SCRIPTSCAN_HOME`.
    EnvVar,
    /// `./.scriptscan` under the current directory.
    Default,
}

/// Paths inside a workspace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
    source: HomeSource,
}

/// Make a user-provided path absolute against the current directory.
fn absolutize(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let path = PathBuf::from(trimmed);
    if path.is_absolute() {
        Ok(path)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

impl WorkspaceLayout {
    /// Layout rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: HomeSource::Explicit,
        }
    }

    /// Resolve the workspace root.
    ///
    /// Resolution order:
    /// 1. `explicit` (the `--home` flag)
    /// 2. `SCRIPTSCAN_HOME`
    /// 3. `./.scriptscan`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, PathError> {
        if let Some(path) = explicit {
            return Ok(Self {
                root: absolutize(&path.to_string_lossy())?,
                source: HomeSource::Explicit,
            });
        }

        if let Ok(value) = env::var(HOME_ENV_VAR)
            && !value.trim().is_empty()
        {
            return Ok(Self {
                root: absolutize(&value)?,
                source: HomeSource::EnvVar,
            });
        }

        Ok(Self {
            root: absolutize(DEFAULT_WORKSPACE_DIR)?,
            source: HomeSource::Default,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn source(&self) -> HomeSource {
        self.source
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.root.join("lexicon.json")
    }

    pub fn model_dir(&self) -> PathBuf {
        self.root.join("model")
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join("entities.json")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn env_file(&self) -> PathBuf {
        self.root.join(".env")
    }

    /// Whether the workspace directory exists.
    pub fn is_provisioned(&self) -> bool {
        self.root.is_dir()
    }

    /// Fail with [`PathError::WorkspaceNotFound`] unless the workspace exists.
    pub fn require_provisioned(&self) -> Result<(), PathError> {
        if self.is_provisioned() {
            Ok(())
        } else {
            Err(PathError::WorkspaceNotFound(self.root.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn explicit_path_wins_over_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(HOME_ENV_VAR, "/tmp/from-env");

        let layout = WorkspaceLayout::resolve(Some(Path::new("/tmp/explicit"))).unwrap();

        assert_eq!(layout.source(), HomeSource::Explicit);
        assert_eq!(layout.root(), Path::new("/tmp/explicit"));
    }

    #[test]
    fn env_var_is_used_without_flag() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(HOME_ENV_VAR, "/tmp/from-env");

        let layout = WorkspaceLayout::resolve(None).unwrap();

        assert_eq!(layout.source(), HomeSource::EnvVar);
        assert!(layout.root().ends_with("from-env"));
    }

    #[test]
    fn defaults_to_dot_dir_in_current_directory() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::unset(HOME_ENV_VAR);

        let layout = WorkspaceLayout::resolve(None).unwrap();

        assert_eq!(layout.source(), HomeSource::Default);
        assert!(layout.root().is_absolute());
        assert!(layout.root().ends_with(DEFAULT_WORKSPACE_DIR));
    }

    #[test]
    fn derived_paths_live_under_root() {
        let layout = WorkspaceLayout::new("/srv/scriptscan");

        assert_eq!(layout.lexicon_path(), Path::new("/srv/scriptscan/lexicon.json"));
        assert_eq!(
            layout.model_path(),
            Path::new("/srv/scriptscan/model/entities.json")
        );
        assert_eq!(layout.data_dir(), Path::new("/srv/scriptscan/data"));
        assert_eq!(layout.env_file(), Path::new("/srv/scriptscan/.env"));
    }

    #[test]
    fn missing_workspace_is_reported() {
        let temp = tempdir().unwrap();
        let layout = WorkspaceLayout::new(temp.path().join("absent"));

        let err = layout.require_provisioned().unwrap_err();

        assert!(matches!(err, PathError::WorkspaceNotFound(_)));
        assert!(err.to_string().contains("Run \"scriptscan setup\" first."));
        assert!(WorkspaceLayout::new(temp.path()).require_provisioned().is_ok());
    }
}
