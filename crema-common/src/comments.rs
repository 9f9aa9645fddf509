//! Comment threads under a post
//!
//! Threads are two levels deep: top-level comments and their replies.
//! Answering a reply does not nest further; the answer is appended to the
//! same top-level comment and mentions the person being answered.

use crate::models::Author;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// What a comment carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentBody {
    Text { text: String },
    Image { url: String, caption: String },
    /// Voice note; only its length is kept
    Audio { duration_secs: u32 },
}

impl CommentBody {
    pub fn text(text: &str) -> Self {
        CommentBody::Text {
            text: text.trim().to_string(),
        }
    }

    /// Nothing worth posting: blank text, missing image, empty recording
    pub fn is_blank(&self) -> bool {
        match self {
            CommentBody::Text { text } => text.trim().is_empty(),
            CommentBody::Image { url, .. } => url.trim().is_empty(),
            CommentBody::Audio { duration_secs } => *duration_secs == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: Author,
    pub body: CommentBody,
    /// Name of the reply author this answers, rendered as `@name: `
    #[serde(default)]
    pub mention: Option<String>,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(id: String, author: Author, body: CommentBody, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            body,
            mention: None,
            likes: 0,
            created_at,
            replies: Vec::new(),
        }
    }

    /// Text shown under the author's name, mention prefix included
    pub fn display_text(&self) -> String {
        let text = match &self.body {
            CommentBody::Text { text } => text.as_str(),
            CommentBody::Image { caption, .. } => caption.as_str(),
            CommentBody::Audio { .. } => "",
        };
        match &self.mention {
            Some(name) => format!("@{}: {}", name, text),
            None => text.to_string(),
        }
    }
}

/// All comments on one post plus the viewer's likes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    post_id: String,
    comments: Vec<Comment>,
    liked: BTreeSet<String>,
    next_seq: u64,
}

impl CommentThread {
    pub fn new(post_id: &str) -> Self {
        Self::with_comments(post_id, Vec::new())
    }

    pub fn with_comments(post_id: &str, comments: Vec<Comment>) -> Self {
        Self {
            post_id: post_id.to_string(),
            comments,
            liked: BTreeSet::new(),
            next_seq: 1,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Top-level comments, oldest first
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Number of comments including replies
    pub fn len(&self) -> usize {
        self.comments.iter().map(|c| 1 + c.replies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn find(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find_map(|root| {
            if root.id == comment_id {
                Some(root)
            } else {
                root.replies.iter().find(|r| r.id == comment_id)
            }
        })
    }

    /// Index of the top-level comment that is, or contains, `comment_id`
    fn root_index(&self, comment_id: &str) -> Option<usize> {
        self.comments
            .iter()
            .position(|root| root.id == comment_id || root.replies.iter().any(|r| r.id == comment_id))
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = format!("{}-n{}", self.post_id, self.next_seq);
            self.next_seq += 1;
            if self.find(&id).is_none() {
                return id;
            }
        }
    }

    /// Append a top-level comment; blank bodies are ignored
    pub fn add(&mut self, author: Author, body: CommentBody, now: DateTime<Utc>) -> Option<&Comment> {
        if body.is_blank() {
            return None;
        }
        let id = self.next_id();
        self.comments.push(Comment::new(id, author, body, now));
        self.comments.last()
    }

    /// Answer `target_id`, which may be a top-level comment or a reply
    ///
    /// The answer always lands under the top-level comment. When the
    /// target is itself a reply, the answer mentions its author.
    pub fn reply(
        &mut self,
        target_id: &str,
        author: Author,
        body: CommentBody,
        now: DateTime<Utc>,
    ) -> Result<Option<&Comment>> {
        let root = self
            .root_index(target_id)
            .ok_or_else(|| Error::NotFound(format!("comment {}", target_id)))?;
        if body.is_blank() {
            return Ok(None);
        }

        let mention = (self.comments[root].id != target_id)
            .then(|| self.find(target_id).map(|c| c.author.name.clone()))
            .flatten();
        debug!(
            post_id = %self.post_id,
            root_id = %self.comments[root].id,
            target_id,
            "Adding reply"
        );

        let id = self.next_id();
        let mut reply = Comment::new(id, author, body, now);
        reply.mention = mention;

        let replies = &mut self.comments[root].replies;
        replies.push(reply);
        Ok(replies.last())
    }

    /// Flip the viewer's like on a comment; returns the new state
    pub fn toggle_like(&mut self, comment_id: &str) -> Result<bool> {
        if self.find(comment_id).is_none() {
            return Err(Error::NotFound(format!("comment {}", comment_id)));
        }
        if self.liked.remove(comment_id) {
            Ok(false)
        } else {
            self.liked.insert(comment_id.to_string());
            Ok(true)
        }
    }

    pub fn is_liked(&self, comment_id: &str) -> bool {
        self.liked.contains(comment_id)
    }

    /// Stored count plus the viewer's own like
    pub fn like_count(&self, comment: &Comment) -> u32 {
        comment
            .likes
            .saturating_add(u32::from(self.is_liked(&comment.id)))
    }
}
