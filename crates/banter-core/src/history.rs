//! Bounded message history.
//!
//! Each room keeps only its most recent [`HISTORY_CAPACITY`] messages in a
//! strict FIFO: appends go to the tail, and once the buffer is full every
//! append evicts exactly one message from the head. Insert and evict are
//! both O(1).
//!
//! The buffer is always initialized; "no messages yet" is an empty buffer,
//! not a missing one. ("No such room" is the store's concern.)

use std::collections::VecDeque;

use banter_proto::Message;

/// Maximum number of messages retained per room.
pub const HISTORY_CAPACITY: usize = 30;

/// Bounded FIFO over the most recent messages of one room.
///
/// Not internally synchronized; lives inside the owning room's mutex.
#[derive(Debug, Clone, Default)]
pub struct MessageHistory {
    messages: VecDeque<Message>,
}

impl MessageHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self { messages: VecDeque::with_capacity(HISTORY_CAPACITY) }
    }

    /// Append a message at the tail, evicting the oldest entry when the
    /// buffer is already full.
    pub fn append(&mut self, message: Message) {
        if self.messages.len() == HISTORY_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);

        debug_assert!(self.messages.len() <= HISTORY_CAPACITY);
    }

    /// Current contents, oldest first. Empty when nothing was posted yet.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing was posted yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
