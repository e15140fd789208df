pub mod cli;
#[allow(clippy::module_inception)]
pub mod config;
pub mod file;
pub mod types;

pub use config::{Config, ConfigError};
pub use types::{Endpoint, LogLevel};
