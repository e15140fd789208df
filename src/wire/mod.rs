pub mod line_codec;
pub mod message;

pub use line_codec::{FrameError, LineDecoder, encode_line};
pub use message::{PortMessage, Reply};
