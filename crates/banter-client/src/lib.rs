//! Client for the banter chat service.
//!
//! A thin typed wrapper over the wire protocol: one TCP connection, one
//! JSON line per request, one line per reply. Each helper method performs a
//! single request/response round trip; polling for new messages is just
//! calling [`Client::fetch_messages`] again.
//!
//! # Example
//!
//! ```no_run
//! use banter_client::Client;
//!
//! # async fn run() -> Result<(), banter_client::ClientError> {
//! let mut client = Client::connect("127.0.0.1:7450").await?;
//! let token = client.register("Alice").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;

pub use banter_proto::{AuthStatus, Message, Request, Response};
pub use client::{Client, CreateRoomOutcome};
pub use error::ClientError;
