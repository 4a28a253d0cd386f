//! Serve command handler: runs the HTTP server in the foreground.

use anyhow::Result;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::ServeArgs;

/// Execute the serve command. Blocks until Ctrl+C.
pub async fn execute(ctx: &CliContext, args: &ServeArgs) -> Result<()> {
    ctx.require_workspace()?;

    let config = args.server_config();
    info!(
        target: "scriptscan.http",
        workspace = %ctx.layout.root().display(),
        "Starting server"
    );
    println!(">>> {}", config.url());
    println!("Press Ctrl+C to stop.");

    scriptscan_axum::start_server(config, &ctx.layout).await
}
