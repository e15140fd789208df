use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    sync::OnceLock,
};
use thiserror::Error;

use super::{
    cli::Args,
    file::FileConfig,
    types::{DEFAULT_ENDPOINT, Endpoint, LogLevel},
};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 7070;
pub const DEFAULT_MAX_FRAME_LEN: usize = 4096;

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static ROOT_CONFIG: OnceLock<Config> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- Config ----------------------------------------------------------------

/// Process-wide settings. Immutable once installed.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub endpoint: Endpoint,
    pub log_level: LogLevel,
    pub max_frame_len: usize,
}

// -----------------------------------------------------------------------------
// ----- Config: Static --------------------------------------------------------

impl Config {
    /// Parses CLI/ENV, reads the optional config file and installs the result.
    pub async fn init() -> Result<&'static Config, ConfigError> {
        let config = Self::resolve(Args::parse()).await?;

        ROOT_CONFIG
            .set(config)
            .map_err(|_| ConfigError::AlreadyInitialized)?;

        Self::get().ok_or(ConfigError::AlreadyInitialized)
    }

    pub fn get() -> Option<&'static Config> {
        ROOT_CONFIG.get()
    }

    pub async fn resolve(args: Args) -> Result<Config, ConfigError> {
        let file = match args.config_file.as_deref() {
            Some(path) => FileConfig::from_file_async(path).await?,
            None => FileConfig::default(),
        };

        Self::merge(args, file)
    }

    /// CLI/ENV wins over the file, the file wins over defaults.
    pub fn merge(args: Args, file: FileConfig) -> Result<Config, ConfigError> {
        let host = args.host.or(file.listen_host).unwrap_or(DEFAULT_HOST);
        let port = args.port.or(file.listen_port).unwrap_or(DEFAULT_PORT);

        let raw_endpoint = args
            .endpoint
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Endpoint::parse(&raw_endpoint)?;

        let max_frame_len = file.max_frame_len.unwrap_or(DEFAULT_MAX_FRAME_LEN);
        if max_frame_len == 0 {
            return Err(ConfigError::ZeroFrameLen);
        }

        Ok(Config {
            listen_addr: SocketAddr::from((host, port)),
            endpoint,
            log_level: args.log_level.or(file.log_level).unwrap_or_default(),
            max_frame_len,
        })
    }
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("toml parse error: {source}")]
    Toml { source: toml::de::Error },

    #[error("invalid endpoint '{raw}': {source}")]
    InvalidEndpoint {
        raw: String,
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme '{scheme}' (expected ws or wss)")]
    UnsupportedScheme { scheme: String },

    #[error("max_frame_len must be greater than zero")]
    ZeroFrameLen,

    #[error("config already initialized")]
    AlreadyInitialized,
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_nothing_is_given() {
        let cfg = Config::merge(Args::default(), FileConfig::default()).unwrap();

        assert_eq!(cfg.listen_addr, "127.0.0.1:7070".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.endpoint.as_str(), "ws://localhost:8080/wschat/1");
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.max_frame_len, DEFAULT_MAX_FRAME_LEN);
    }

    #[test]
    fn cli_wins_over_file() {
        let args = Args {
            port: Some(9001),
            endpoint: Some("ws://cli.local/wschat/1".into()),
            ..Default::default()
        };
        let file = FileConfig {
            listen_host: Some("0.0.0.0".parse().unwrap()),
            listen_port: Some(9002),
            endpoint: Some("ws://file.local/wschat/1".into()),
            log_level: Some(LogLevel::Trace),
            max_frame_len: Some(64),
        };

        let cfg = Config::merge(args, file).unwrap();

        assert_eq!(cfg.listen_addr, "0.0.0.0:9001".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.endpoint.as_str(), "ws://cli.local/wschat/1");
        assert_eq!(cfg.log_level, LogLevel::Trace);
        assert_eq!(cfg.max_frame_len, 64);
    }

    #[test]
    fn bad_endpoint_is_an_error() {
        let args = Args {
            endpoint: Some("ftp://localhost/wschat/1".into()),
            ..Default::default()
        };

        let err = Config::merge(args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
    }

    #[test]
    fn zero_frame_len_is_an_error() {
        let file = FileConfig {
            max_frame_len: Some(0),
            ..Default::default()
        };

        let err = Config::merge(Args::default(), file).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFrameLen));
    }

    #[tokio::test]
    async fn resolve_reads_the_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"ws://from-file:8080/wschat/3\"").unwrap();

        let args = Args {
            config_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let cfg = Config::resolve(args).await.unwrap();
        assert_eq!(cfg.endpoint.as_str(), "ws://from-file:8080/wschat/3");
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
