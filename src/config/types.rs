use serde::Deserialize;
use std::{fmt, sync::Arc};
use url::Url;

use super::config::ConfigError;

// -------------------------------------------------------------------------------------------------
// ---- Constants ----------------------------------------------------------------------------------

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/wschat/1";

// -------------------------------------------------------------------------------------------------
// ---- LogLevel -----------------------------------------------------------------------------------

#[derive(clap::ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

// -------------------------------------------------------------------------------------------------
// ---- Endpoint -----------------------------------------------------------------------------------

/// The WebSocket target of the shared connection.
///
/// Keeps the text exactly as configured so replies echo it verbatim, while
/// the parsed [`Url`] is only used for validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    raw: Arc<str>,
    url: Url,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint {
            raw: raw.to_string(),
            source,
        })?;

        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    scheme: other.to_string(),
                });
            }
        }

        Ok(Self {
            raw: Arc::from(raw),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// -------------------------------------------------------------------------------------------------
// ---- Tests --------------------------------------------------------------------------------------


// -------------------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------
