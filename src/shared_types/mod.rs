pub mod gate_state;
pub mod port_id;
pub mod ready_state;

pub use gate_state::GateState;
pub use port_id::PortId;
pub use ready_state::ReadyState;
