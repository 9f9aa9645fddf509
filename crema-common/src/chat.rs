//! Direct-message sessions
//!
//! In-memory conversation state only; nothing is transmitted. A message
//! request from a stranger stays restricted until the user replies once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of message payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    /// `text` holds the image URL
    Image,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    /// Sent by the current user
    pub is_me: bool,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub kind: MessageKind,
}

/// The other side of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPeer {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub is_official: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub peer: ChatPeer,
    pub last_message: String,
    pub unread_count: u32,
    /// The peer is not someone the user follows
    pub is_stranger: bool,
    /// The user has answered at least once
    pub has_replied: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// A stranger's request the user has not yet accepted by replying
    pub fn is_restricted(&self) -> bool {
        self.is_stranger && !self.has_replied
    }

    /// Append an outgoing text message
    ///
    /// Blank input is ignored and returns `None`. Sending always lifts the
    /// stranger restriction.
    pub fn send(&mut self, text: &str, now: DateTime<Utc>) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            id: format!("{}-{}", self.id, self.messages.len() + 1),
            is_me: true,
            text: text.to_string(),
            sent_at: now,
            kind: MessageKind::Text,
        });
        self.last_message = text.to_string();
        self.has_replied = true;
        self.messages.last()
    }

    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }
}
