//! Wire contract for the banter chat service.
//!
//! The service is poll-based request/response: a client sends one request
//! line, the server answers with one reply line. Lines are JSON (the service
//! has browser-adjacent clients; JSON is self-describing and needs no code
//! generation), delimited by `\n`.
//!
//! This crate is the bottom of the dependency stack: it defines the value
//! types shared by client, core, and server ([`Message`], [`AuthStatus`]),
//! the request/response envelope ([`Request`], [`Response`]), and the line
//! codec with its size limit.
//!
//! # Invariants
//!
//! - Round-trip encoding of any [`Request`] or [`Response`] produces an
//!   equivalent value.
//! - Decoding never panics; every malformed input is a [`ProtocolError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod errors;
mod message;
mod wire;

pub use errors::ProtocolError;
pub use message::{AuthStatus, Message};
pub use wire::{
    MAX_LINE_BYTES, Request, Response, decode_request, decode_response, encode_request,
    encode_response,
};
