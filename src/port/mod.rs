#[allow(clippy::module_inception)]
pub mod port;

pub use port::Port;
