//! Commands enum and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use scriptscan_axum::ServerConfig;
use scriptscan_core::settings::{HOST_ENV_VAR, MAX_UPLOAD_ENV_VAR, MODEL_URL_ENV_VAR, PORT_ENV_VAR};

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the workspace: directories, lexicon, settings and entity model
    Setup {
        /// Rewrite lexicon.json with the built-in dictionaries
        #[arg(long)]
        force: bool,
        /// Bind address to store in the workspace .env
        #[arg(long)]
        host: Option<String>,
        /// Port to store in the workspace .env
        #[arg(long)]
        port: Option<u16>,
        /// Where to download the entity model from when none is installed
        #[arg(long, env = MODEL_URL_ENV_VAR)]
        model_url: Option<String>,
        /// Exit right away instead of waiting for Enter
        #[arg(long)]
        no_wait: bool,
    },

    /// Run the HTTP server in the foreground
    Serve(ServeArgs),

    /// Start the HTTP server as a detached background process
    Launch {
        #[command(flatten)]
        serve: ServeArgs,
        /// Exit right after starting the server instead of waiting for Enter
        #[arg(long)]
        no_wait: bool,
    },

    /// Break down a script file locally and print the result
    Parse {
        /// Script file (.txt, .docx, .pdf or .rtf)
        file: PathBuf,
        /// Print the JSON returned by the HTTP API instead of text
        #[arg(long)]
        json: bool,
    },

    /// Train the entity model from annotated examples
    Train {
        /// Directory with annotated *.txt files (defaults to <workspace>/data)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Where to write the model (defaults to <workspace>/model/entities.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show resolved workspace paths
    Paths,
}

impl Commands {
    /// Whether the command waits for Enter before the process exits.
    ///
    /// `setup` and `launch` usually run in their own console window.
    pub const fn pauses_on_exit(&self) -> bool {
        match self {
            Self::Setup { no_wait, .. } | Self::Launch { no_wait, .. } => !*no_wait,
            _ => false,
        }
    }
}

/// Server options shared by `serve` and `launch`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to bind [default: 127.0.0.1]
    #[arg(long, env = HOST_ENV_VAR)]
    pub host: Option<String>,
    /// Port to listen on [default: 8000]
    #[arg(long, env = PORT_ENV_VAR)]
    pub port: Option<u16>,
    /// Allowed CORS origin, repeatable (any origin when omitted)
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
    /// Request body limit in bytes [default: 33554432]
    #[arg(long, env = MAX_UPLOAD_ENV_VAR)]
    pub max_upload_bytes: Option<usize>,
}

impl ServeArgs {
    /// Server configuration with defaults for unset options.
    pub fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::with_defaults().with_allowed_origins(self.cors_origins.clone());
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(limit) = self.max_upload_bytes {
            config = config.with_max_upload_bytes(limit);
        }
        config
    }

    /// The options as command-line flags, for re-invoking `serve`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(host) = &self.host {
            args.extend(["--host".to_string(), host.clone()]);
        }
        if let Some(port) = self.port {
            args.extend(["--port".to_string(), port.to_string()]);
        }
        for origin in &self.cors_origins {
            args.extend(["--cors-origin".to_string(), origin.clone()]);
        }
        if let Some(limit) = self.max_upload_bytes {
            args.extend(["--max-upload-bytes".to_string(), limit.to_string()]);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;
    use scriptscan_axum::CorsConfig;

    #[test]
    fn unset_serve_args_use_defaults() {
        let config = ServeArgs::default().server_config();
        assert_eq!(config, ServerConfig::with_defaults());
    }

    #[test]
    fn serve_args_override_defaults() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            cors_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: Some(1024),
        };

        let config = args.server_config();

        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(
            config.cors,
            CorsConfig::AllowOrigins(vec!["http://localhost:3000".to_string()])
        );
    }

    #[test]
    fn serve_args_survive_a_round_trip_through_flags() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            cors_origins: vec!["http://a".to_string(), "http://b".to_string()],
            max_upload_bytes: None,
        };

        let mut argv = vec!["scriptscan".to_string(), "serve".to_string()];
        argv.extend(args.to_args());
        let cli = Cli::parse_from(argv);

        match cli.command {
            Some(Commands::Serve(parsed)) => {
                assert_eq!(parsed.host, args.host);
                assert_eq!(parsed.port, args.port);
                assert_eq!(parsed.cors_origins, args.cors_origins);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn setup_and_launch_pause_unless_told_not_to() {
        let pauses = |argv: &[&str]| {
            Cli::parse_from(argv.iter().copied())
                .command
                .is_some_and(|c| c.pauses_on_exit())
        };

        assert!(pauses(&["scriptscan", "setup"]));
        assert!(!pauses(&["scriptscan", "setup", "--no-wait"]));
        assert!(pauses(&["scriptscan", "launch"]));
        assert!(!pauses(&["scriptscan", "launch", "--no-wait"]));
        assert!(!pauses(&["scriptscan", "serve"]));
        assert!(!pauses(&["scriptscan", "paths"]));
    }

    #[test]
    fn parse_command_takes_file_and_json_flag() {
        let cli = Cli::parse_from(["scriptscan", "parse", "script.docx", "--json"]);
        match cli.command {
            Some(Commands::Parse { file, json }) => {
                assert_eq!(file, PathBuf::from("script.docx"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
