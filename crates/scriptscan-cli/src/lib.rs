//! `scriptscan` command-line interface.
//!
//! Wires the workspace layout, the core services and the HTTP adapter
//! together for operators: `setup`, `serve`, `launch`, `parse`, `train`
//! and `paths`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod model_source;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ServeArgs};
pub use error::{CliError, exit_code_for};
pub use model_source::HttpModelSource;
pub use parser::Cli;
