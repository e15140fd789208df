use std::sync::atomic::{AtomicU64, Ordering};

// -----------------------------------------------------------------------------
// ----- GateCounters ----------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct GateCounters {
    ports_attached: AtomicU64,
    starts_handled: AtomicU64,
    messages_ignored: AtomicU64,
    connections_opened: AtomicU64,
}

impl GateCounters {
    pub(crate) fn port_attached(&self) {
        self.ports_attached.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn start_handled(&self) {
        self.starts_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn message_ignored(&self) {
        self.messages_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> GateStats {
        GateStats {
            ports_attached: self.ports_attached.load(Ordering::Relaxed),
            starts_handled: self.starts_handled.load(Ordering::Relaxed),
            messages_ignored: self.messages_ignored.load(Ordering::Relaxed),
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- GateStats -------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    pub ports_attached: u64,
    pub starts_handled: u64,
    pub messages_ignored: u64,
    pub connections_opened: u64,
}

pub fn format_gate_stats(stats: GateStats) -> String {
    format!(
        "ports_attached={}\nstarts_handled={}\nmessages_ignored={}\nconnections_opened={}",
        stats.ports_attached, stats.starts_handled, stats.messages_ignored, stats.connections_opened
    )
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
