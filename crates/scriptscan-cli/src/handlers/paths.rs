//! Paths command handler.
//!
//! Displays all resolved workspace paths for diagnostics.

use anyhow::Result;

use scriptscan_core::paths::ResolvedPaths;

use crate::bootstrap::CliContext;

/// Execute the paths command.
///
/// Prints `key = value` lines. Works whether or not the workspace exists.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let paths = ResolvedPaths::from_layout(&ctx.layout);
    println!("{paths}");
    Ok(())
}
