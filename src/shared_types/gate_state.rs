/// Lifecycle of the shared connection gate.
///
/// The gate starts in `NoConnection` and moves to `Connected` exactly once,
/// on the first `start` request from any port. `Connected` is terminal for the
/// lifetime of the process; it does not track whether the upstream socket is
/// actually open (see [`ReadyState`](super::ReadyState) for that).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No connection has been requested yet.
    NoConnection,

    /// A connection handle exists and is reused by every later request.
    Connected,
}
