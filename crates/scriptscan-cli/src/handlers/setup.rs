//! Setup command handler: provisions the workspace.

use std::sync::Arc;

use anyhow::Result;
use scriptscan_core::{ProvisionOptions, ProvisionReport, Provisioner, ServerSettings};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::model_source::HttpModelSource;
use crate::presentation::{print_banner, print_status, wait_for_enter};

/// Arguments for the setup command.
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    pub force: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_url: Option<String>,
    pub no_wait: bool,
}

/// Run provisioning without printing anything.
pub async fn provision(ctx: &CliContext, args: SetupArgs) -> Result<ProvisionReport, CliError> {
    let mut provisioner = Provisioner::new(ctx.layout.clone());
    if let Some(url) = args.model_url.filter(|u| !u.trim().is_empty()) {
        provisioner = provisioner.with_model_source(Arc::new(HttpModelSource::new(url)));
    }

    let options = ProvisionOptions {
        force_lexicon: args.force,
        server: ServerSettings {
            host: args.host,
            port: args.port,
        },
    };

    Ok(provisioner.run(&options).await?)
}

/// Execute the setup command.
pub async fn execute(ctx: &CliContext, args: SetupArgs) -> Result<()> {
    let no_wait = args.no_wait;
    println!("Provisioning {}", ctx.layout.root().display());
    let report = provision(ctx, args).await?;

    print_banner("scriptscan environment");
    print_status("workspace", report.workspace.as_str());
    print_status("directories", report.directories.as_str());
    print_status("lexicon", report.lexicon.as_str());
    print_status(".env", report.env_file.as_str());
    print_status("entity model", &report.model);
    println!();

    if !report.model_ready() {
        println!("Scenes will be analyzed with lexicon heuristics.");
        println!("Train a model with: scriptscan train");
    }
    println!("Start the server with: scriptscan launch");

    if !no_wait {
        wait_for_enter("Press Enter to exit...")?;
    }
    Ok(())
}
