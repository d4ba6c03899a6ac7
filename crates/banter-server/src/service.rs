//! Request façade over the chat core.
//!
//! `ChatService` owns the credential registry and the room store and maps
//! each wire request onto exactly one core operation. All five operations
//! are synchronous, short, in-memory calls; the transport layer invokes
//! them directly from connection tasks without extra queuing.
//!
//! Error values never escape as panics: every outcome, including NotFound
//! and invalid input, becomes a reply the caller can act on.

use std::sync::Arc;

use banter_core::{
    AuthStatus, ChatError, CredentialRegistry, CredentialToken, Environment, Message, Room, RoomId,
    RoomStore, authenticate,
};
use banter_proto::{Request, Response};

/// The request façade: owns all chat state and serves the five operations.
///
/// Cloneable via `Arc` at the caller's discretion; the registry and store
/// carry their own locks, so `&self` methods are safe from any number of
/// connection tasks.
pub struct ChatService<E: Environment> {
    registry: CredentialRegistry,
    rooms: RoomStore,
    env: E,
}

impl<E: Environment> ChatService<E> {
    /// Create a service with empty state.
    pub fn new(env: E) -> Self {
        Self { registry: CredentialRegistry::new(), rooms: RoomStore::new(), env }
    }

    /// Register a display name. Always succeeds.
    pub fn register(&self, display_name: &str) -> CredentialToken {
        self.registry.register(display_name, &self.env)
    }

    /// Create a room with `token` as creator and first authorized member.
    ///
    /// # Errors
    ///
    /// [`ChatError::CredentialNotFound`] when the token is not a valid
    /// credential; the wire layer turns this into the register redirect.
    pub fn create_room(&self, token: &CredentialToken) -> Result<Arc<Room>, ChatError> {
        if !self.registry.is_valid(token) {
            return Err(ChatError::CredentialNotFound(token.as_str().to_string()));
        }

        Ok(self.rooms.create_room(token.clone(), &self.env))
    }

    /// A room's history, oldest first. No credential check for reads.
    ///
    /// # Errors
    ///
    /// [`ChatError::RoomNotFound`] when the id names no room.
    pub fn fetch_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ChatError> {
        let room = self.rooms.get(room_id).ok_or(ChatError::RoomNotFound(room_id))?;
        Ok(room.snapshot())
    }

    /// Post a message, resolving the sender's display name at post time.
    ///
    /// # Errors
    ///
    /// - [`ChatError::EmptyMessageBody`] for an empty body (no-op)
    /// - [`ChatError::CredentialNotFound`] when the token does not resolve
    /// - [`ChatError::RoomNotFound`] when the id names no room
    pub fn post_message(
        &self,
        room_id: RoomId,
        token: &CredentialToken,
        body: &str,
    ) -> Result<(), ChatError> {
        if body.is_empty() {
            return Err(ChatError::EmptyMessageBody);
        }

        let display_name = self
            .registry
            .resolve(token)
            .ok_or_else(|| ChatError::CredentialNotFound(token.as_str().to_string()))?;

        let room = self.rooms.get(room_id).ok_or(ChatError::RoomNotFound(room_id))?;
        room.append_message(Message { display_name, body: body.to_string() });

        tracing::debug!(room_id, "message posted");

        Ok(())
    }

    /// Run the authentication state machine. Never errors; all three
    /// outcomes are values.
    pub fn authenticate(
        &self,
        room_id: RoomId,
        token: &CredentialToken,
        supplied_secret: &str,
    ) -> AuthStatus {
        authenticate(&self.rooms, &self.registry, room_id, token, supplied_secret)
    }

    /// Dispatch one wire request to the operation it names.
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Register { display_name } => {
                let token = self.register(&display_name);
                Response::Registered { token: token.as_str().to_string() }
            },

            Request::CreateRoom { token } => {
                match self.create_room(&CredentialToken::new(token)) {
                    Ok(room) => Response::RoomCreated {
                        room_id: room.id(),
                        shared_secret: room.shared_secret().to_string(),
                    },
                    // Invalid creator credential: send the caller to register
                    Err(_) => Response::RedirectToRegister,
                }
            },

            Request::FetchMessages { room_id } => match self.fetch_messages(room_id) {
                Ok(messages) if messages.is_empty() => Response::NoMessages,
                Ok(messages) => Response::Messages { messages },
                Err(err) => Response::Error { reason: err.to_string() },
            },

            Request::PostMessage { room_id, token, body } => {
                match self.post_message(room_id, &CredentialToken::new(token), &body) {
                    Ok(()) => Response::Posted,
                    Err(err) => Response::Error { reason: err.to_string() },
                }
            },

            Request::Authenticate { room_id, token, secret } => {
                let token = CredentialToken::from_optional(token);
                let outcome = self.authenticate(room_id, &token, &secret.unwrap_or_default());
                Response::Auth { outcome }
            },
        }
    }
}
