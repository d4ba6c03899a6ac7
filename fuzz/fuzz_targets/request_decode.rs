//! Fuzz target for the wire line codec.
//!
//! Feeds arbitrary byte sequences to both decoders to find:
//! - Parser crashes or panics
//! - Size-limit bypasses
//!
//! The decoders should NEVER panic. All invalid inputs must return an
//! error.

#![no_main]

use banter_proto::{decode_request, decode_response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the decoders in production (lines are read
    // into String), so fuzz the str surface
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = decode_request(line);
        let _ = decode_response(line);
    }
});
