//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;
use scriptscan_core::paths::HOME_ENV_VAR;

use crate::commands::Commands;

/// Screenplay scene breakdown: characters, crowd, props, makeup, costumes
/// and effects per scene.
#[derive(Parser, Debug)]
#[command(name = "scriptscan")]
#[command(about = "Break screenplays down into scenes and production elements")]
#[command(version)]
pub struct Cli {
    /// Workspace directory (defaults to ./.scriptscan)
    #[arg(long, global = true, env = HOME_ENV_VAR)]
    pub home: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["scriptscan", "--verbose", "--home", "/tmp/ws", "paths"]);
        assert!(cli.verbose);
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/ws")));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn global_args_after_subcommand() {
        let cli = Cli::parse_from(["scriptscan", "paths", "--home", "/tmp/ws", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/ws")));
    }
}
