//! Request/response envelope and line codec.
//!
//! One JSON object per line. Requests carry an `"op"` tag, replies a
//! `"reply"` tag, so either side can be parsed without peeking at field
//! names. Field names follow the service contract (`displayName`, `roomId`,
//! `body`, ...).
//!
//! The codec enforces a line size limit before parsing. Everything past that
//! is plain serde.

use serde::{Deserialize, Serialize};

use crate::{
    errors::ProtocolError,
    message::{AuthStatus, Message},
};

/// Maximum accepted length of a single wire line, in bytes.
///
/// Chat bodies are short; 64 KiB leaves generous headroom while bounding
/// what a peer can make the other side buffer.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// A client request.
///
/// `token` and `secret` in [`Request::Authenticate`] are optional on the
/// wire: a fresh visitor following an invite link has no credential yet, and
/// a returning member may omit the secret entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    /// Register a display name and obtain a credential token.
    Register {
        /// Display name to register. Not required to be unique.
        display_name: String,
    },

    /// Create a new room. The creator becomes its first authorized member.
    CreateRoom {
        /// Credential token of the creator.
        token: String,
    },

    /// Fetch the current message history of a room (no credential check).
    FetchMessages {
        /// Room to read.
        room_id: u64,
    },

    /// Post a message to a room.
    PostMessage {
        /// Room to post to.
        room_id: u64,
        /// Credential token of the sender; resolved to a display name at
        /// post time.
        token: String,
        /// Message text.
        body: String,
    },

    /// Run the authentication state machine against a room.
    Authenticate {
        /// Room to authenticate against.
        room_id: u64,
        /// Credential token, if the caller has one.
        #[serde(default)]
        token: Option<String>,
        /// Shared secret from an invite link, if supplied.
        #[serde(default)]
        secret: Option<String>,
    },
}

/// A server reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Response {
    /// Registration succeeded (it always does).
    Registered {
        /// Freshly issued credential token.
        token: String,
    },

    /// Room created.
    RoomCreated {
        /// Identifier of the new room.
        room_id: u64,
        /// The room's shared secret, returned to the creator so invite
        /// links can be shared.
        shared_secret: String,
    },

    /// The creator's token was invalid; register first, then retry.
    RedirectToRegister,

    /// Message history, oldest first.
    Messages {
        /// The room's current history window.
        messages: Vec<Message>,
    },

    /// The room exists but holds no messages yet. Distinct from an unknown
    /// room, which is an [`Response::Error`].
    NoMessages,

    /// Message accepted.
    Posted,

    /// Authentication outcome.
    Auth {
        /// Terminal result of the state machine.
        outcome: AuthStatus,
    },

    /// The request named a room or credential that does not exist, or was
    /// otherwise unprocessable. Never fatal to the connection.
    Error {
        /// Human-readable cause.
        reason: String,
    },
}

/// Encode a request as a single JSON line (without the trailing newline).
pub fn encode_request(request: &Request) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(request)?)
}

/// Decode a request from one wire line.
///
/// # Errors
///
/// - [`ProtocolError::LineTooLong`] if the line exceeds [`MAX_LINE_BYTES`]
/// - [`ProtocolError::Malformed`] for anything serde rejects
pub fn decode_request(line: &str) -> Result<Request, ProtocolError> {
    check_line_len(line)?;
    Ok(serde_json::from_str(line.trim_end())?)
}

/// Encode a reply as a single JSON line (without the trailing newline).
pub fn encode_response(response: &Response) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)?)
}

/// Decode a reply from one wire line.
///
/// # Errors
///
/// Same conditions as [`decode_request`].
pub fn decode_response(line: &str) -> Result<Response, ProtocolError> {
    check_line_len(line)?;
    Ok(serde_json::from_str(line.trim_end())?)
}

fn check_line_len(line: &str) -> Result<(), ProtocolError> {
    if line.len() > MAX_LINE_BYTES {
        return Err(ProtocolError::LineTooLong { len: line.len(), max: MAX_LINE_BYTES });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_wire_shape() {
        let request = Request::Register { display_name: "Alice".to_string() };

        let line = encode_request(&request).unwrap();
        assert_eq!(line, r#"{"op":"register","displayName":"Alice"}"#);
    }

    #[test]
    fn authenticate_accepts_missing_token_and_secret() {
        let request = decode_request(r#"{"op":"authenticate","roomId":3}"#).unwrap();

        assert_eq!(request, Request::Authenticate { room_id: 3, token: None, secret: None });
    }

    #[test]
    fn request_round_trip() {
        let original = Request::PostMessage {
            room_id: 0,
            token: "deadbeef".to_string(),
            body: "hello".to_string(),
        };

        let line = encode_request(&original).unwrap();
        let decoded = decode_request(&line).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn response_round_trip() {
        let original = Response::Messages {
            messages: vec![Message { display_name: "Bob".to_string(), body: "hey".to_string() }],
        };

        let line = encode_response(&original).unwrap();
        let decoded = decode_response(&line).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn auth_reply_carries_snake_case_outcome() {
        let line = encode_response(&Response::Auth { outcome: AuthStatus::Pending }).unwrap();
        assert_eq!(line, r#"{"reply":"auth","outcome":"pending"}"#);
    }

    #[test]
    fn unknown_op_is_malformed() {
        let result = decode_request(r#"{"op":"teleport","roomId":1}"#);
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn oversized_line_is_rejected_before_parsing() {
        let line = "x".repeat(MAX_LINE_BYTES + 1);

        let result = decode_request(&line);
        assert!(matches!(result, Err(ProtocolError::LineTooLong { .. })));
    }

    #[test]
    fn trailing_carriage_return_is_tolerated() {
        let request = decode_request("{\"op\":\"fetch_messages\",\"roomId\":7}\r").unwrap();
        assert_eq!(request, Request::FetchMessages { room_id: 7 });
    }
}
