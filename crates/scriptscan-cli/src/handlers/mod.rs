//! Command handlers.
//!
//! Handlers follow the same shape:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>` (async where needed)
//! - Thin wrappers that validate CLI input, call the core services and
//!   format output for the terminal
//!
//! Business logic stays in `scriptscan-core`.

pub mod launch;
pub mod parse;
pub mod paths;
pub mod serve;
pub mod setup;
pub mod train;
