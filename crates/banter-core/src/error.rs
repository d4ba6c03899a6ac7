//! Error types for the chat core.
//!
//! Every variant is a reported value surfaced to the caller; the core never
//! terminates the process on bad input. Authentication outcomes
//! ([`banter_proto::AuthStatus`]) are deliberately NOT errors: all three are
//! expected client-facing states.

use thiserror::Error;

use crate::room::RoomId;

/// Errors from core chat operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// No room with this id exists.
    ///
    /// Room ids are server-assigned and dense; an unknown id means the
    /// caller fabricated or stale-cached it.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The credential token is not in the registry.
    ///
    /// Posting resolves the sender's display name through the registry, so
    /// an unregistered token cannot post.
    #[error("credential not found: {0}")]
    CredentialNotFound(String),

    /// Message body was empty. Treated as a no-op, not a crash.
    #[error("message body is empty")]
    EmptyMessageBody,
}
