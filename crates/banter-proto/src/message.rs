//! Shared value types: chat messages and authentication outcomes.

use serde::{Deserialize, Serialize};

/// A single chat message as stored and served.
///
/// The display name is resolved from the sender's credential at post time
/// and stored by value, not as a reference into the credential registry:
/// history shows who a sender was when they posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Sender's display name at post time.
    pub display_name: String,

    /// Message text. Never empty (empty bodies are rejected at the façade).
    pub body: String,
}

/// Terminal outcome of an authentication attempt.
///
/// All three are normal client-facing states, not errors. `Pending` tells a
/// visitor holding a valid invite secret to register for a credential and
/// retry; it never mutates room membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Access granted. Either the credential was already an authorized
    /// member, or a valid credential presented the correct secret and has
    /// just been added to the member set.
    Success,

    /// The secret is correct but the caller holds no registered credential.
    /// Register and retry.
    Pending,

    /// Unknown room, wrong secret, or no grounds for access.
    Fail,
}
