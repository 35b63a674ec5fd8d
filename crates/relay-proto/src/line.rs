//! Line-based codec for tokio.
//!
//! Reads newline-terminated UTF-8 lines and writes lines terminated with a
//! single `\n`. A trailing `\r` before the newline is accepted and stripped
//! so that telnet-style clients work unchanged. A carriage return anywhere
//! else in a line is rejected, so every decoded line can be written back out
//! verbatim.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};

/// Default maximum line length in bytes, excluding the terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Line-based codec that handles newline-terminated messages.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// Maximum accepted line length in bytes.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let newline_at = self.next_index + offset;
            let line = src.split_to(newline_at + 1);
            self.next_index = 0;

            let mut content = &line[..newline_at];
            if let [rest @ .., b'\r'] = content {
                content = rest;
            }

            if content.len() > self.max_len {
                return Err(ProtocolError::LineTooLong {
                    actual: content.len(),
                    limit: self.max_len,
                });
            }

            if content.contains(&b'\r') {
                return Err(ProtocolError::EmbeddedNewline);
            }

            let data = std::str::from_utf8(content).map_err(|e| ProtocolError::InvalidUtf8 {
                byte_pos: e.valid_up_to(),
                details: e.to_string(),
            })?;

            Ok(Some(data.to_owned()))
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();

            // One spare byte for a '\r' whose '\n' has not arrived yet.
            if src.len() > self.max_len + 1 {
                return Err(ProtocolError::LineTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<()> {
        let line = line.as_ref();
        if line.contains(['\r', '\n']) {
            return Err(ProtocolError::EmbeddedNewline);
        }
        dst.reserve(line.len() + 1);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}
