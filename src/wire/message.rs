use bytes::Bytes;
use std::fmt;

use crate::config::Endpoint;

use super::line_codec::encode_line;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const START: &[u8] = b"start";

// -----------------------------------------------------------------------------
// ----- PortMessage -----------------------------------------------------------

/// Inbound request on a port. Only the exact payload `start` means anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMessage {
    Start,
    Unknown,
}

impl PortMessage {
    pub fn classify(frame: &[u8]) -> Self {
        if frame == START {
            PortMessage::Start
        } else {
            PortMessage::Unknown
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Reply -----------------------------------------------------------------

/// Outbound answer to a `start` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Started(Endpoint),
    Reusing(Endpoint),
}

impl Reply {
    pub fn is_started(&self) -> bool {
        matches!(self, Reply::Started(_))
    }

    pub fn to_line(&self) -> Bytes {
        encode_line(&self.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Started(endpoint) => write!(f, "started connection to {endpoint}"),
            Reply::Reusing(endpoint) => write!(f, "reusing connection to {endpoint}"),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
