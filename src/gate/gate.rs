use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::config::{Config, Endpoint};
use crate::port::Port;
use crate::shared_types::{GateState, PortId, ReadyState};
use crate::wire::{PortMessage, Reply};

use super::{
    connection_handle::ConnectionHandle,
    stats::{GateCounters, GateStats},
};

// -----------------------------------------------------------------------------
// ----- ConnectionGate --------------------------------------------------------

/// Owns the one shared upstream connection and hands out ports to clients.
///
/// The connection slot is guarded by a mutex so that concurrent `start`
/// requests from different ports still open at most one connection. The
/// critical section only spawns the handshake, it never awaits it.
#[derive(Debug)]
pub struct ConnectionGate {
    endpoint: Endpoint,
    max_frame_len: usize,
    connection: Mutex<Option<ConnectionHandle>>,
    next_port_id: AtomicU64,
    counters: GateCounters,
}

// -----------------------------------------------------------------------------
// ----- ConnectionGate: Static ------------------------------------------------

impl ConnectionGate {
    pub fn new(endpoint: Endpoint, max_frame_len: usize) -> Self {
        Self {
            endpoint,
            max_frame_len,
            connection: Mutex::new(None),
            next_port_id: AtomicU64::new(1),
            counters: GateCounters::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.max_frame_len)
    }
}

// -----------------------------------------------------------------------------
// ----- ConnectionGate: Public ------------------------------------------------

impl ConnectionGate {
    /// Wraps `stream` in a port, registers it with the gate and starts it.
    pub fn attach<S>(self: &Arc<Self>, stream: S) -> JoinHandle<()>
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let id = PortId(self.next_port_id.fetch_add(1, Ordering::Relaxed));
        let port = Port::new(id, stream, self.max_frame_len);
        self.counters.port_attached();

        let gate = Arc::clone(self);
        tokio::spawn(port.start(gate))
    }

    /// Dispatches one inbound frame. Anything but `start` is dropped silently.
    pub fn handle_message(&self, port: PortId, frame: &[u8]) -> Option<Reply> {
        match PortMessage::classify(frame) {
            PortMessage::Start => {
                let reply = self.handle_start();
                debug!("port {port}: {reply}");
                Some(reply)
            }

            PortMessage::Unknown => {
                self.counters.message_ignored();
                debug!("port {port}: ignoring {} byte message", frame.len());
                None
            }
        }
    }

    pub fn handle_start(&self) -> Reply {
        self.counters.start_handled();

        let mut slot = self.connection.lock();
        if slot.is_some() {
            return Reply::Reusing(self.endpoint.clone());
        }

        *slot = Some(ConnectionHandle::open(self.endpoint.clone()));
        self.counters.connection_opened();
        info!("opened shared connection to {}", self.endpoint);

        Reply::Started(self.endpoint.clone())
    }

    pub fn state(&self) -> GateState {
        if self.connection.lock().is_some() {
            GateState::Connected
        } else {
            GateState::NoConnection
        }
    }

    /// `None` until the first `start`.
    pub fn connection_ready_state(&self) -> Option<ReadyState> {
        self.connection
            .lock()
            .as_ref()
            .map(ConnectionHandle::ready_state)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn stats(&self) -> GateStats {
        self.counters.snapshot()
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DEFAULT_ENDPOINT;

    const STARTED: &str = "started connection to ws://localhost:8080/wschat/1";
    const REUSING: &str = "reusing connection to ws://localhost:8080/wschat/1";

    fn gate() -> Arc<ConnectionGate> {
        let endpoint = Endpoint::parse(DEFAULT_ENDPOINT).unwrap();
        Arc::new(ConnectionGate::new(endpoint, 1024))
    }

    #[tokio::test]
    async fn first_start_opens_then_reuses() {
        let gate = gate();
        assert_eq!(gate.state(), GateState::NoConnection);
        assert!(gate.connection_ready_state().is_none());

        assert_eq!(gate.handle_start().to_string(), STARTED);
        assert_eq!(gate.state(), GateState::Connected);
        assert!(gate.connection_ready_state().is_some());

        assert_eq!(gate.handle_start().to_string(), REUSING);
        assert_eq!(gate.handle_start().to_string(), REUSING);
        assert_eq!(gate.stats().connections_opened, 1);
        assert_eq!(gate.stats().starts_handled, 3);
    }

    #[tokio::test]
    async fn n_starts_from_one_port_give_one_started() {
        let gate = gate();
        let port = PortId(1);

        let replies: Vec<Reply> = (0..10)
            .filter_map(|_| gate.handle_message(port, b"start"))
            .collect();

        assert_eq!(replies.len(), 10);
        assert!(replies[0].is_started());
        assert!(replies[1..].iter().all(|r| !r.is_started()));
    }

    #[tokio::test]
    async fn other_payloads_change_nothing() {
        let gate = gate();

        for payload in [&b"stop"[..], b"", b"START"] {
            assert!(gate.handle_message(PortId(7), payload).is_none());
        }

        assert_eq!(gate.state(), GateState::NoConnection);
        let stats = gate.stats();
        assert_eq!(stats.messages_ignored, 3);
        assert_eq!(stats.starts_handled, 0);
        assert_eq!(stats.connections_opened, 0);

        // The first real start after noise still opens the connection.
        assert_eq!(
            gate.handle_message(PortId(7), b"start").unwrap().to_string(),
            STARTED
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_starts_open_exactly_once() {
        let gate = gate();

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.handle_start() })
            })
            .collect();

        let mut started = 0;
        for task in tasks {
            if task.await.unwrap().is_started() {
                started += 1;
            }
        }

        assert_eq!(started, 1);
        assert_eq!(gate.stats().connections_opened, 1);
        assert_eq!(gate.stats().starts_handled, 64);
    }

    #[test]
    fn from_config_uses_configured_endpoint() {
        let config = Config {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            endpoint: Endpoint::parse("wss://chat.example.com/wschat/9").unwrap(),
            log_level: Default::default(),
            max_frame_len: 16,
        };

        let gate = ConnectionGate::from_config(&config);
        assert_eq!(gate.endpoint().as_str(), "wss://chat.example.com/wschat/9");
        assert_eq!(gate.state(), GateState::NoConnection);
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
