//! Parse command handler: breaks a script file down locally.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scriptscan_core::{ParsedScript, ScriptService};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::render_script;

/// Parse `file` with the workspace lexicon and model, if any.
pub fn parse_file(ctx: &CliContext, file: &Path) -> Result<ParsedScript> {
    let content = fs::read(file)
        .map_err(CliError::from)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let service = ScriptService::from_workspace(&ctx.layout).map_err(CliError::from)?;
    Ok(service
        .parse_document(&filename, &content)
        .map_err(CliError::from)?)
}

/// Execute the parse command.
pub fn execute(ctx: &CliContext, file: &Path, json: bool) -> Result<()> {
    let parsed = parse_file(ctx, file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print!("{}", render_script(&parsed));
    }
    Ok(())
}
