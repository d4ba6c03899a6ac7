//! Fuzz target for the bounded message history.
//!
//! Model-based: replays an arbitrary append sequence against both the real
//! buffer and a plain Vec reference model.
//!
//! # Invariants
//!
//! - Snapshot length never exceeds 30
//! - Snapshot equals the last min(n, 30) appends, oldest first
//! - Appending never panics, including the empty-to-one transition

#![no_main]

use arbitrary::Arbitrary;
use banter_core::{HISTORY_CAPACITY, Message, MessageHistory};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct AppendSequence {
    bodies: Vec<String>,
}

fuzz_target!(|sequence: AppendSequence| {
    let mut history = MessageHistory::new();
    let mut model: Vec<Message> = Vec::new();

    for body in sequence.bodies {
        let message = Message { display_name: "fuzzer".to_string(), body };
        history.append(message.clone());
        model.push(message);

        let snapshot = history.snapshot();
        assert!(snapshot.len() <= HISTORY_CAPACITY);

        let window_start = model.len().saturating_sub(HISTORY_CAPACITY);
        assert_eq!(snapshot, &model[window_start..]);
    }
});
