pub mod config;
pub mod errors;
pub mod gate;
pub mod port;
pub mod server;
pub mod shared_types;
pub mod wire;

pub use config::Config;
pub use errors::GateError;
pub use gate::ConnectionGate;
