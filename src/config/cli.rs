use clap::Parser;
use std::{net::IpAddr, path::PathBuf};

use super::types::LogLevel;

// -----------------------------------------------------------------------------
// ----- Args ------------------------------------------------------------------

/// Command line / environment layer. Every field is optional so the config
/// file and built-in defaults can fill the gaps.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "wsgate", version, about = "Shared WebSocket connection gate")]
pub struct Args {
    // IPv4 or IPv6 literal (e.g., 0.0.0.0, 127.0.0.1, ::, ::1).
    #[arg(long = "host", short = 'H', env = "WSGATE_HOST")]
    pub host: Option<IpAddr>,

    #[arg(long = "port", short = 'p', env = "WSGATE_PORT")]
    pub port: Option<u16>,

    // ws:// or wss:// URL of the shared upstream connection.
    #[arg(long = "endpoint", env = "WSGATE_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long = "log", env = "WSGATE_LOG")]
    pub log_level: Option<LogLevel>,

    // Optional TOML file; must exist when given.
    #[arg(long = "config", env = "WSGATE_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
