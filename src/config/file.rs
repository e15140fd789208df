use serde::Deserialize;
use std::{net::IpAddr, path::Path};
use tokio::fs;

use super::{config::ConfigError, types::LogLevel};

// -----------------------------------------------------------------------------
// ----- FileConfig ------------------------------------------------------------

/// On-disk format of `wsgate.toml`. All keys are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub listen_host: Option<IpAddr>,
    pub listen_port: Option<u16>,
    pub endpoint: Option<String>,
    pub log_level: Option<LogLevel>,
    pub max_frame_len: Option<usize>,
}

// -----------------------------------------------------------------------------
// ----- FileConfig: Static ----------------------------------------------------

impl FileConfig {
    pub async fn from_file_async(path: &Path) -> Result<FileConfig, ConfigError> {
        let raw = fs::read_to_string(path).await.map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<FileConfig, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Toml { source: e })
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
