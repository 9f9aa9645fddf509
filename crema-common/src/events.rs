//! Event types for the Crema event log
//!
//! The store records every state change it makes as a [`CremaEvent`]. The
//! log is synchronous and bounded: when full, the oldest entries are dropped,
//! mirroring a lagging subscriber on a broadcast channel.

use crate::feed::FeedTab;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Crema event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CremaEvent {
    /// A new note was added to the top of the feed
    PostPublished {
        post_id: String,
        author_id: String,
        varietal_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// A publication revealed a new varietal specimen
    ///
    /// Triggers:
    /// - Toast: "New Specimen Unlocked: {display_name}"
    VarietalUnlocked {
        user_id: String,
        varietal_id: String,
        display_name: String,
        timestamp: DateTime<Utc>,
    },

    /// The viewer liked or unliked a post
    LikeToggled {
        post_id: String,
        has_liked: bool,
        likes: u32,
        timestamp: DateTime<Utc>,
    },

    /// Tab or filter selection changed; the feed was recomputed
    FeedFiltersChanged {
        tab: FeedTab,
        filters_active: bool,
        visible_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The user commented on a post or answered a comment
    CommentAdded {
        post_id: String,
        comment_id: String,
        /// Top-level comment the reply was filed under
        root_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// The user sent a direct message
    MessageSent {
        chat_id: String,
        message_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl CremaEvent {
    /// Variant name, matching the serialized `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            CremaEvent::PostPublished { .. } => "PostPublished",
            CremaEvent::VarietalUnlocked { .. } => "VarietalUnlocked",
            CremaEvent::LikeToggled { .. } => "LikeToggled",
            CremaEvent::FeedFiltersChanged { .. } => "FeedFiltersChanged",
            CremaEvent::CommentAdded { .. } => "CommentAdded",
            CremaEvent::MessageSent { .. } => "MessageSent",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            CremaEvent::PostPublished { timestamp, .. }
            | CremaEvent::VarietalUnlocked { timestamp, .. }
            | CremaEvent::LikeToggled { timestamp, .. }
            | CremaEvent::FeedFiltersChanged { timestamp, .. }
            | CremaEvent::CommentAdded { timestamp, .. }
            | CremaEvent::MessageSent { timestamp, .. } => *timestamp,
        }
    }
}

/// Bounded, in-order event log
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<CremaEvent>,
    capacity: usize,
}

impl EventLog {
    /// Create a log holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event, dropping the oldest if the log is full
    pub fn emit(&mut self, event: CremaEvent) {
        trace!(event_type = event.event_type(), "Event emitted");
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Remove and return all buffered events, oldest first
    pub fn drain(&mut self) -> Vec<CremaEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CremaEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(1000)
    }
}
