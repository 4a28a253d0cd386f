//! Launch command handler: starts `scriptscan serve` as a detached process.
//!
//! The child gets its own process group (a new console on Windows) so it
//! survives the launcher. The launcher does not supervise it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Result;
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::commands::ServeArgs;
use crate::error::CliError;
use crate::presentation::wait_for_enter;

/// Log file for the detached server, inside the workspace.
const SERVER_LOG_FILE: &str = "server.log";

#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

/// Build the `serve` invocation for a detached child.
pub fn build_command(exe: &Path, workspace: &Path, args: &ServeArgs) -> Command {
    let mut cmd = Command::new(exe);
    cmd.arg("serve")
        .arg("--home")
        .arg(workspace)
        .args(args.to_args())
        .stdin(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(CREATE_NEW_CONSOLE);
    }

    cmd
}

fn server_log_path(ctx: &CliContext) -> PathBuf {
    ctx.layout.root().join(SERVER_LOG_FILE)
}

/// Spawn the server and return its PID.
pub fn spawn(ctx: &CliContext, args: &ServeArgs) -> Result<u32, CliError> {
    ctx.require_workspace()?;

    let exe = std::env::current_exe()
        .map_err(|e| CliError::Process(format!("cannot locate scriptscan binary: {e}")))?;
    let log_path = server_log_path(ctx);
    let log = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let mut cmd = build_command(&exe, ctx.layout.root(), args);
    cmd.stdout(log.try_clone()?).stderr(log);
    debug!(target: "scriptscan.launch", command = ?cmd, "Spawning server");

    let child = cmd
        .spawn()
        .map_err(|e| CliError::Process(format!("failed to start server: {e}")))?;
    info!(target: "scriptscan.launch", pid = child.id(), log = %log_path.display(), "Server started");

    Ok(child.id())
}

/// Execute the launch command.
pub fn execute(ctx: &CliContext, args: &ServeArgs, no_wait: bool) -> Result<()> {
    let pid = spawn(ctx, args)?;
    let url = args.server_config().url();

    println!("Server started (PID {pid})");
    println!(">>> {url}");
    println!("Logs: {}", server_log_path(ctx).display());

    if !no_wait {
        wait_for_enter("Press Enter to exit the launcher (the server keeps running)...")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptscan_core::WorkspaceLayout;
    use tempfile::tempdir;

    #[test]
    fn command_reinvokes_serve_with_workspace_and_flags() {
        let args = ServeArgs {
            port: Some(9000),
            ..ServeArgs::default()
        };

        let cmd = build_command(Path::new("/usr/bin/scriptscan"), Path::new("/srv/ws"), &args);

        assert_eq!(cmd.get_program(), "/usr/bin/scriptscan");
        let argv: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(argv, ["serve", "--home", "/srv/ws", "--port", "9000"]);
    }

    #[test]
    fn launch_without_workspace_spawns_nothing() {
        let temp = tempdir().unwrap();
        let ctx = CliContext {
            layout: WorkspaceLayout::new(temp.path().join("missing")),
        };

        let err = spawn(&ctx, &ServeArgs::default()).unwrap_err();

        assert!(matches!(err, CliError::WorkspaceNotFound(_)));
        assert!(!temp.path().join("missing").exists());
    }
}
