use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One visible chat turn. `id` is a client-local sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub from: Speaker,
    pub text: String,
}

/// The live transcript of a chat view.
///
/// Owns the local id sequence; ids are assigned in append order and never
/// reused within one transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    last_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: Speaker, text: impl Into<String>) -> u64 {
        self.last_id += 1;
        self.messages.push(ChatMessage {
            id: self.last_id,
            from,
            text: text.into(),
        });
        self.last_id
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> u64 {
        self.push(Speaker::User, text)
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> u64 {
        self.push(Speaker::Bot, text)
    }

    /// Replace the turns before `live_from` with fetched history. Turns from
    /// `live_from` on stay after it, and the whole transcript is renumbered.
    pub fn load_history(&mut self, history: Vec<ChatMessage>, live_from: usize) {
        let live = self.messages.split_off(live_from.min(self.messages.len()));
        self.clear();
        for msg in history.into_iter().chain(live) {
            self.push(msg.from, msg.text);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_id = 0;
    }
}
