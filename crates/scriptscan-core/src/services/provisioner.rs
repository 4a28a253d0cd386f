//! Workspace provisioning (`scriptscan setup`).
//!
//! Brings a workspace directory to a runnable state: directories, default
//! lexicon, server settings and, when possible, the entity model. Running
//! it again on a provisioned workspace changes nothing unless asked to.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analysis::Lexicon;
use crate::model::{EntityModel, ModelError};
use crate::paths::{DirectoryCreationStrategy, DirectoryStatus, WorkspaceLayout, ensure_directory};
use crate::ports::{CoreError, ModelSource};
use crate::settings::{ServerSettings, validate_settings};

/// Options for a provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Rewrite `lexicon.json` even if it exists.
    pub force_lexicon: bool,
    /// Explicit server settings to persist into the workspace `.env`.
    pub server: ServerSettings,
}

/// Outcome of a file or directory step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Created,
    AlreadyPresent,
    Updated,
}

impl StepStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyPresent => "already present",
            Self::Updated => "updated",
        }
    }
}

impl From<DirectoryStatus> for StepStatus {
    fn from(status: DirectoryStatus) -> Self {
        match status {
            DirectoryStatus::Created => Self::Created,
            DirectoryStatus::AlreadyPresent => Self::AlreadyPresent,
        }
    }
}

/// State of the entity model after provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    /// A usable model was already in the workspace.
    Loaded { entries: usize },
    /// The model was fetched and verified.
    Downloaded { source: String, bytes: u64, entries: usize },
    /// Fetching or verifying the model failed. Setup continues.
    AcquireFailed { source: String, reason: String },
    /// No model and no source configured; the heuristic fallback applies.
    Missing { reason: String },
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { entries } => write!(f, "loaded ({entries} entries)"),
            Self::Downloaded {
                source,
                bytes,
                entries,
            } => write!(f, "downloaded from {source} ({bytes} bytes, {entries} entries)"),
            Self::AcquireFailed { source, reason } => {
                write!(f, "could not be acquired from {source}: {reason}")
            }
            Self::Missing { reason } => write!(f, "not available ({reason}); using lexicon heuristics"),
        }
    }
}

/// What a provisioning run did, step by step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub workspace: StepStatus,
    pub directories: StepStatus,
    pub lexicon: StepStatus,
    pub env_file: StepStatus,
    pub model: ModelStatus,
}

impl ProvisionReport {
    /// Whether the entity model is usable after this run.
    pub const fn model_ready(&self) -> bool {
        matches!(
            self.model,
            ModelStatus::Loaded { .. } | ModelStatus::Downloaded { .. }
        )
    }
}

/// Provisions a workspace directory.
pub struct Provisioner {
    layout: WorkspaceLayout,
    model_source: Option<Arc<dyn ModelSource>>,
}

impl Provisioner {
    pub const fn new(layout: WorkspaceLayout) -> Self {
        Self {
            layout,
            model_source: None,
        }
    }

    /// Fetch the entity model from `source` when the workspace has none.
    #[must_use]
    pub fn with_model_source(mut self, source: Arc<dyn ModelSource>) -> Self {
        self.model_source = Some(source);
        self
    }

    pub const fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub async fn run(&self, options: &ProvisionOptions) -> Result<ProvisionReport, CoreError> {
        validate_settings(&options.server)?;

        let root = self.layout.root();
        let workspace: StepStatus =
            ensure_directory(root, DirectoryCreationStrategy::AutoCreate)?.into();
        info!(target: "scriptscan.setup", path = %root.display(), status = workspace.as_str(), "Workspace");

        let data = ensure_directory(&self.layout.data_dir(), DirectoryCreationStrategy::AutoCreate)?;
        let model = ensure_directory(&self.layout.model_dir(), DirectoryCreationStrategy::AutoCreate)?;
        let directories = if data == DirectoryStatus::Created || model == DirectoryStatus::Created {
            StepStatus::Created
        } else {
            StepStatus::AlreadyPresent
        };

        let lexicon = self.install_lexicon(options.force_lexicon)?;
        let env_file = self.write_env(&options.server)?;
        let model = self.acquire_model().await;

        Ok(ProvisionReport {
            workspace,
            directories,
            lexicon,
            env_file,
            model,
        })
    }

    fn install_lexicon(&self, force: bool) -> Result<StepStatus, CoreError> {
        let path = self.layout.lexicon_path();
        let status = match (path.exists(), force) {
            (false, _) => StepStatus::Created,
            (true, true) => StepStatus::Updated,
            (true, false) => return Ok(StepStatus::AlreadyPresent),
        };

        Lexicon::default().save(&path)?;
        debug!(target: "scriptscan.setup", path = %path.display(), "Default lexicon written");
        Ok(status)
    }

    fn write_env(&self, explicit: &ServerSettings) -> Result<StepStatus, CoreError> {
        let path = self.layout.env_file();

        if !path.exists() {
            let settings = ServerSettings {
                host: explicit.host.clone().or_else(|| ServerSettings::with_defaults().host),
                port: explicit.port.or_else(|| ServerSettings::with_defaults().port),
            };
            settings.persist(&path)?;
            return Ok(StepStatus::Created);
        }

        if *explicit == ServerSettings::default() {
            return Ok(StepStatus::AlreadyPresent);
        }

        explicit.persist(&path)?;
        Ok(StepStatus::Updated)
    }

    async fn acquire_model(&self) -> ModelStatus {
        let path = self.layout.model_path();

        let load_error = match EntityModel::load(&path) {
            Ok(model) => return ModelStatus::Loaded { entries: model.len() },
            Err(e) => e,
        };

        let Some(source) = &self.model_source else {
            let reason = match load_error {
                ModelError::NotFound(_) => "no trained model and no model URL configured".to_string(),
                other => other.to_string(),
            };
            return ModelStatus::Missing { reason };
        };

        let description = source.describe();
        info!(
            target: "scriptscan.setup",
            source = %description,
            error = %load_error,
            "Entity model not usable, fetching"
        );

        let bytes = match source.fetch(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(target: "scriptscan.setup", error = %e, "Model download failed");
                return ModelStatus::AcquireFailed {
                    source: description,
                    reason: e.to_string(),
                };
            }
        };

        // Verify by loading what was fetched.
        match EntityModel::load(&path) {
            Ok(model) => ModelStatus::Downloaded {
                source: description,
                bytes,
                entries: model.len(),
            },
            Err(e) => {
                warn!(target: "scriptscan.setup", error = %e, "Downloaded model failed verification");
                ModelStatus::AcquireFailed {
                    source: description,
                    reason: format!("verification failed: {e}"),
                }
            }
        }
    }
}
