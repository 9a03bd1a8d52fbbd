//! Configuration types and constants for the devconnector server.

use std::path::PathBuf;

use clap::Parser;

pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub(crate) const DATA_DIR_NAME: &str = ".devconnector";

/// Largest JSON request body accepted by any route.
pub(crate) const JSON_BODY_LIMIT: usize = 64 * 1024;

/// REST API for the devconnector developer network.
///
/// Configuration can be set via CLI arguments or environment variables.
/// CLI arguments take precedence over environment variables.
#[derive(Parser, Debug)]
#[command(name = "devconnector", version, about)]
pub struct Cli {
    /// HTTP server bind address [env: DEVCONNECTOR_BIND] [default: 127.0.0.1:5000]
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// Data directory for the database [env: DEVCONNECTOR_HOME] [default: ~/.devconnector]
    #[arg(long, short = 'd')]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    pub bind_addr: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_cli_and_env(cli: Cli) -> Self {
        let data_dir = cli
            .data_dir
            .or_else(|| std::env::var("DEVCONNECTOR_HOME").ok().map(PathBuf::from))
            .unwrap_or_else(|| {
                std::env::var("HOME")
                    .map(|h| PathBuf::from(h).join(DATA_DIR_NAME))
                    .unwrap_or_else(|_| PathBuf::from(DATA_DIR_NAME))
            });

        let bind_addr = cli
            .bind
            .or_else(|| std::env::var("DEVCONNECTOR_BIND").ok())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Self {
            bind_addr,
            data_dir,
        }
    }
}
