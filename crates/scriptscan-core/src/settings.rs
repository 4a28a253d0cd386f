//! Server settings persisted in the workspace `.env`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{PathError, persist_env_value, read_env_value};

/// Default bind address of the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the HTTP server.
pub const DEFAULT_PORT: u16 = 8000;

/// Default request body limit for uploads (32 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub const HOST_ENV_VAR: &str = "SCRIPTSCAN_HOST";
pub const PORT_ENV_VAR: &str = "SCRIPTSCAN_PORT";
pub const MODEL_URL_ENV_VAR: &str = "SCRIPTSCAN_MODEL_URL";
pub const MAX_UPLOAD_ENV_VAR: &str = "SCRIPTSCAN_MAX_UPLOAD_BYTES";

/// Server settings. Unset fields fall back to the defaults above.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ServerSettings {
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
        }
    }

    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    #[must_use]
    pub const fn effective_port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None => DEFAULT_PORT,
        }
    }

    /// Read settings from an env file. Missing keys stay `None`.
    pub fn from_env_file(path: &Path) -> Result<Self, SettingsError> {
        let host = read_env_value(path, HOST_ENV_VAR)?;
        let port = read_env_value(path, PORT_ENV_VAR)?
            .map(|raw| {
                raw.parse::<u16>()
                    .map_err(|_| SettingsError::InvalidPort(raw.clone()))
            })
            .transpose()?;
        Ok(Self { host, port })
    }

    /// Write the set fields into an env file.
    pub fn persist(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(host) = &self.host {
            persist_env_value(path, HOST_ENV_VAR, host)?;
        }
        if let Some(port) = self.port {
            persist_env_value(path, PORT_ENV_VAR, &port.to_string())?;
        }
        Ok(())
    }
}

/// Errors from reading or validating server settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Host cannot be empty")]
    EmptyHost,

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Reject settings the server cannot bind with.
pub fn validate_settings(settings: &ServerSettings) -> Result<(), SettingsError> {
    if settings.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
        return Err(SettingsError::EmptyHost);
    }
    if settings.port == Some(0) {
        return Err(SettingsError::InvalidPort("0".to_string()));
    }
    Ok(())
}
