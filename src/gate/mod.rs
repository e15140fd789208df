// Connection-reuse gate; keep port framing in port/ and wire/.
pub mod connection_handle;
#[allow(clippy::module_inception)]
pub mod gate;
pub mod stats;

pub use connection_handle::ConnectionHandle;
pub use gate::ConnectionGate;
pub use stats::{GateStats, format_gate_stats};
