//! CLI entry point - the composition root.
//!
//! Parses arguments, resolves the workspace and dispatches to handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use scriptscan_cli::handlers::{self, setup::SetupArgs};
use scriptscan_cli::presentation::wait_for_enter;
use scriptscan_cli::{Cli, CliConfig, CliContext, Commands, bootstrap, exit_code_for};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI. The flag tells whether a failure should pause before exit.
async fn run() -> (anyhow::Result<()>, bool) {
    // ./.env first; real environment variables always win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match bootstrap(&CliConfig::new(cli.home.clone())) {
        Ok(ctx) => ctx,
        Err(e) => return (Err(e), false),
    };

    // Workspace settings sit below flags and the process environment, so
    // parse again once they are loaded.
    let cli = if ctx.load_workspace_env() {
        Cli::parse()
    } else {
        cli
    };

    let Some(command) = cli.command else {
        return (Cli::command().print_help().map_err(Into::into), false);
    };

    let pause = command.pauses_on_exit();
    (dispatch(&ctx, command).await, pause)
}

async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Setup {
            force,
            host,
            port,
            model_url,
            no_wait,
        } => {
            let args = SetupArgs {
                force,
                host,
                port,
                model_url,
                no_wait,
            };
            handlers::setup::execute(ctx, args).await?;
        }
        Commands::Serve(args) => {
            handlers::serve::execute(ctx, &args).await?;
        }
        Commands::Launch { serve, no_wait } => {
            handlers::launch::execute(ctx, &serve, no_wait)?;
        }
        Commands::Parse { file, json } => {
            handlers::parse::execute(ctx, &file, json)?;
        }
        Commands::Train { data, output } => {
            handlers::train::execute(ctx, data.as_deref(), output.as_deref())?;
        }
        Commands::Paths => {
            handlers::paths::execute(ctx)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let (result, pause) = run().await;
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if pause {
                let _ = wait_for_enter("Press Enter to exit...");
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}
