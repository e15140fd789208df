//! The single upstream WebSocket owned by the gate.
//!
//! Opening is fire-and-forget: the handshake runs on a spawned task and the
//! caller gets the handle back immediately. Failures are logged and reflected
//! in [`ReadyState`], never reported to ports.

use futures_util::StreamExt;
use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::config::Endpoint;
use crate::shared_types::ReadyState;

// -----------------------------------------------------------------------------
// ----- ConnectionHandle ------------------------------------------------------

#[derive(Debug)]
pub struct ConnectionHandle {
    endpoint: Endpoint,
    ready_state: Arc<AtomicU8>,
    task: JoinHandle<()>,
}

// -----------------------------------------------------------------------------
// ----- ConnectionHandle: Static ----------------------------------------------

impl ConnectionHandle {
    /// Must be called from within a tokio runtime.
    pub fn open(endpoint: Endpoint) -> Self {
        let ready_state = Arc::new(AtomicU8::new(ReadyState::Connecting.as_u8()));
        let task = tokio::spawn(drive(endpoint.clone(), ready_state.clone()));

        Self {
            endpoint,
            ready_state,
            task,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- ConnectionHandle: Public ----------------------------------------------

impl ConnectionHandle {
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.ready_state.load(Ordering::SeqCst))
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// -----------------------------------------------------------------------------
// ----- Internal: Connection task ---------------------------------------------

async fn drive(endpoint: Endpoint, ready_state: Arc<AtomicU8>) {
    info!("connecting to {}", endpoint);

    let (mut stream, response) = match connect_async(endpoint.as_str()).await {
        Ok(v) => v,
        Err(e) => {
            warn!("connection to {} failed: {e}", endpoint);
            ready_state.store(ReadyState::Closed.as_u8(), Ordering::SeqCst);
            return;
        }
    };

    ready_state.store(ReadyState::Open.as_u8(), Ordering::SeqCst);
    info!(
        "connected to {} (status: {})",
        endpoint,
        response.status()
    );

    // Nothing is sent upstream; keep reading so control frames get answered.
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                debug!("upstream text ({} bytes): {}", text.len(), text.as_str());
            }

            Ok(Message::Binary(data)) => {
                debug!("upstream binary ({} bytes)", data.len());
            }

            Ok(Message::Close(frame)) => {
                let (code, reason) = frame
                    .map(|f| (u16::from(f.code), f.reason.to_string()))
                    .unwrap_or((1005, String::new()));
                info!("upstream {} closed: {code} {reason}", endpoint);
                break;
            }

            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {}

            Err(e) => {
                warn!("upstream {} read error: {e}", endpoint);
                break;
            }
        }
    }

    ready_state.store(ReadyState::Closed.as_u8(), Ordering::SeqCst);
    info!("connection to {} ended", endpoint);
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
