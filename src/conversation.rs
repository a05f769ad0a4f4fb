//! In-memory conversation log and chat wire types.
//!
//! DESIGN
//! ======
//! `Conversation` is append-only: messages are pushed in arrival order and
//! never edited or removed. Each chat request carries a bounded trailing
//! window of that log (the context window) plus the message being sent.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use serde::{Deserialize, Serialize};

/// Number of stored messages sent as context with each request.
pub const CONTEXT_WINDOW: usize = 10;

/// Assistant text shown when a chat request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble right now. Please try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn. `content` is plain text, never markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Body of `POST /api/v1/chat/{shop_id}/public`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Ordered message log for one widget instance.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent `CONTEXT_WINDOW` stored messages, oldest first.
    pub fn context(&self) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        &self.messages[start..]
    }

    /// Request body for sending `next`: the stored context window followed by
    /// `next`. Call before `next` is pushed.
    pub fn request_for(&self, next: &ChatMessage) -> ChatRequest {
        let mut messages = Vec::with_capacity(CONTEXT_WINDOW + 1);
        messages.extend_from_slice(self.context());
        messages.push(next.clone());
        ChatRequest { messages }
    }
}
