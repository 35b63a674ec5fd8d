//! Error types for the relay wire protocol.
//!
//! Framing failures are reported as [`ProtocolError`]; display-name
//! validation failures as [`NameError`].

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Framing and decoding errors raised by the line codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in a line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },

    /// A line (complete or still buffering) exceeded the configured limit.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Actual line length seen so far.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// A line contained a carriage return or newline other than its
    /// terminator.
    #[error("embedded line terminator")]
    EmbeddedNewline,
}

/// Reasons a display name is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Name was empty or whitespace only.
    #[error("name is empty")]
    Empty,

    /// Name contained whitespace or a control character.
    #[error("name contains illegal character {0:?}")]
    IllegalChar(char),

    /// Name exceeded the maximum length in characters.
    #[error("name too long: {actual} chars (limit: {limit})")]
    TooLong {
        /// Actual length in characters.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_too_long_display() {
        let err = ProtocolError::LineTooLong {
            actual: 20,
            limit: 10,
        };
        assert_eq!(err.to_string(), "line too long: 20 bytes (limit: 10)");
    }

    #[test]
    fn name_error_display() {
        assert_eq!(NameError::Empty.to_string(), "name is empty");
        assert_eq!(
            NameError::TooLong { actual: 40, limit: 32 }.to_string(),
            "name too long: 40 chars (limit: 32)"
        );
    }
}
