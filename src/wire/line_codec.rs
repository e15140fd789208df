//! Newline-delimited text framing for port streams.
//!
//! Bytes are appended to the inbox by the caller; complete lines are split off
//! without copying. The scan cursor remembers how far a partial line has
//! already been searched so a slow writer does not cause quadratic rescans.

use bytes::{BufMut, Bytes, BytesMut};
use memchr::memchr;
use thiserror::Error;

// -----------------------------------------------------------------------------
// ----- LineDecoder -----------------------------------------------------------

#[derive(Debug)]
pub struct LineDecoder {
    inbox: BytesMut,
    scanned: usize,
    max_frame_len: usize,
}

impl LineDecoder {
    pub fn new(max_frame_len: usize) -> Self {
        Self {
            inbox: BytesMut::with_capacity(max_frame_len.min(4096)),
            scanned: 0,
            max_frame_len,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- LineDecoder: Public ---------------------------------------------------

impl LineDecoder {
    #[inline]
    pub fn inbox_mut(&mut self) -> &mut BytesMut {
        &mut self.inbox
    }

    /// Pops the next complete line, without its `\n` or `\r\n` terminator.
    pub fn next_frame(&mut self) -> Result<Option<BytesMut>, FrameError> {
        let Some(offset) = memchr(b'\n', &self.inbox[self.scanned..]) else {
            self.scanned = self.inbox.len();

            if self.scanned > self.max_frame_len {
                return Err(FrameError::TooLong {
                    len: self.scanned,
                    max: self.max_frame_len,
                });
            }

            return Ok(None);
        };

        let end = self.scanned + offset;
        self.scanned = 0;

        if end > self.max_frame_len {
            return Err(FrameError::TooLong {
                len: end,
                max: self.max_frame_len,
            });
        }

        let mut frame = self.inbox.split_to(end + 1);
        frame.truncate(end);

        if frame.last() == Some(&b'\r') {
            frame.truncate(end - 1);
        }

        Ok(Some(frame))
    }

    /// Bytes of an unterminated trailing line.
    #[inline]
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }
}

// -----------------------------------------------------------------------------
// ----- Encoding --------------------------------------------------------------

pub fn encode_line(text: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(text.len() + 1);
    buf.extend_from_slice(text.as_bytes());
    buf.put_u8(b'\n');
    buf.freeze()
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame of {len} bytes exceeds limit of {max}")]
    TooLong { len: usize, max: usize },
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
