//! Client error types.

use banter_proto::ProtocolError;
use thiserror::Error;

/// Errors from client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Underlying socket error (connect, read, or write failed).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server's reply line could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server reported an error reply (unknown room, unknown
    /// credential, empty body). The connection stays usable.
    #[error("server error: {0}")]
    Server(String),

    /// The server answered with a reply that does not fit the request.
    #[error("unexpected reply to {operation}")]
    UnexpectedReply {
        /// Operation whose reply surprised us
        operation: &'static str,
    },

    /// The server closed the connection.
    #[error("connection closed by server")]
    Disconnected,
}
