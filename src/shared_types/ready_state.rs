// -----------------------------------------------------------------------------
// ----- ReadyState ------------------------------------------------------------

/// Mirrors the browser WebSocket `readyState` of the upstream connection.
/// Stored as a byte in an atomic so the connection task can publish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Connecting,
    Open,
    Closed,
}

// -----------------------------------------------------------------------------
// ----- ReadyState: Static ----------------------------------------------------

impl ReadyState {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ReadyState::Connecting => 0,
            ReadyState::Open => 1,
            ReadyState::Closed => 3,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            _ => ReadyState::Closed,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
