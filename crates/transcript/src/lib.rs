//! Bounded conversation history.
//!
//! The transcript is append-only with front-eviction: once `capacity`
//! messages are held, each append drops the oldest entry, so the buffer
//! always shows the most recent window of the conversation. Hydration from
//! a full-state snapshot applies the same rule to the initial list.

use std::collections::VecDeque;

use vigil_console_interface::Message;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transcript capacity must be positive")]
    InvalidCapacity,
}

#[derive(Debug, Clone)]
pub struct TranscriptBuffer {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl TranscriptBuffer {
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append one message, evicting the oldest entry past capacity.
    pub fn push(&mut self, message: Message) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Replace the contents with the last `capacity` entries of `initial`,
    /// oldest first. Used when the channel delivers a full-state snapshot
    /// instead of an incremental append.
    pub fn hydrate(&mut self, initial: Vec<Message>) {
        let skip = initial.len().saturating_sub(self.capacity);
        self.messages.clear();
        self.messages.extend(initial.into_iter().skip(skip));
    }

    /// Messages in display order, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TranscriptBuffer {
    fn default() -> Self {
        Self {
            messages: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }
}
