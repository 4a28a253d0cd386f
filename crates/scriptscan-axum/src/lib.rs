//! HTTP adapter for scriptscan.
//!
//! Exposes the scene breakdown over HTTP with axum: `/parse_file`,
//! `/parse_text` and `/health`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used by the integration tests
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, serve, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
