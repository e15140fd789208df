use thiserror::Error;

use crate::config::ConfigError;
use crate::wire::FrameError;

// -----------------------------------------------------------------------------
// ----- GateError -------------------------------------------------------------

/// Crate-level error. Upstream connection failures never end up here, they
/// are logged by the connection task and otherwise swallowed.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
