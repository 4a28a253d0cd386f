//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where the HTTP adapter is wired to the
//! core service.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use scriptscan_core::paths::WorkspaceLayout;
use scriptscan_core::services::ScriptService;
use scriptscan_core::settings::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};
use tokio::net::TcpListener;
use tracing::info;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow any origin, method and header.
    #[default]
    AllowAll,
    /// Allow specific origins only.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
    /// Request body limit, applied to uploads.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn with_defaults() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set CORS to allow specific origins. An empty list keeps `AllowAll`.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        if !origins.is_empty() {
            self.cors = CorsConfig::AllowOrigins(origins);
        }
        self
    }

    #[must_use]
    pub const fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for display.
    pub fn url(&self) -> String {
        format!("http://{}", self.bind_addr())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    pub service: Arc<ScriptService>,
}

impl AxumContext {
    pub fn new(service: ScriptService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the context from a provisioned workspace.
pub fn bootstrap(layout: &WorkspaceLayout) -> Result<AxumContext> {
    layout.require_provisioned()?;

    info!(
        target: "scriptscan.paths",
        workspace = %layout.root().display(),
        lexicon = %layout.lexicon_path().display(),
        model = %layout.model_path().display(),
        "Axum bootstrap resolved paths"
    );

    let service = ScriptService::from_workspace(layout)?;
    Ok(AxumContext::new(service))
}

/// Serve `ctx` until `shutdown` resolves.
pub async fn serve(
    ctx: AxumContext,
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = crate::routes::create_router(ctx, config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        target: "scriptscan.http",
        url = %config.url(),
        max_upload_bytes = config.max_upload_bytes,
        "scriptscan server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!(target: "scriptscan.http", "Server stopped");
    Ok(())
}

/// Bootstrap from `layout` and serve until Ctrl+C.
pub async fn start_server(config: ServerConfig, layout: &WorkspaceLayout) -> Result<()> {
    let ctx = bootstrap(layout)?;
    serve(ctx, &config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
