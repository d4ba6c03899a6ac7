//! Protocol error types.
//!
//! Every decoding failure is a reported value, never a panic: the server
//! answers malformed input with an error reply and keeps serving.

use thiserror::Error;

/// Errors from encoding or decoding wire lines.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Input line is not valid JSON or does not match the envelope schema.
    #[error("malformed line: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Input line exceeds [`crate::MAX_LINE_BYTES`].
    ///
    /// Oversized lines are rejected before parsing so a peer cannot force
    /// unbounded buffering.
    #[error("line too long: {len} bytes exceeds limit of {max}")]
    LineTooLong {
        /// Actual line length in bytes
        len: usize,
        /// Maximum permitted length
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_too_long_display() {
        let err = ProtocolError::LineTooLong { len: 100_000, max: 65_536 };
        assert_eq!(err.to_string(), "line too long: 100000 bytes exceeds limit of 65536");
    }
}
