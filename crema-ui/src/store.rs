//! Application state container
//!
//! `AppStore` is the single owner of mutable session state: the post
//! collection and its comment threads, the signed-in user, tab and filter
//! selections, the inbox and the transient toast. Every mutation goes through a method here, which
//! calls into the pure `crema_common` core and records a [`CremaEvent`].

use crate::seed;
use chrono::{DateTime, Duration, Utc};
use crema_common::catalog::VarietalInfo;
use crema_common::chat::ChatSession;
use crema_common::comments::{CommentBody, CommentThread};
use crema_common::config::TomlConfig;
use crema_common::events::{CremaEvent, EventLog};
use crema_common::feed::{self, FeedTab, FilterState};
use crema_common::models::{Author, Post, PostDraft, PrefillData, User};
use crema_common::palate::award_publish;
use crema_common::radar::{RadarGeometry, RadarProjector};
use crema_common::{Error, FlavorProfile, Language, Result, UnlockTracker, VarietalCatalog};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Auto-dismissing notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub message: String,
    pub icon: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// What the caller learns from a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    pub post_id: String,
    pub unlocked: Option<VarietalInfo>,
}

/// Session state container
#[derive(Debug, Clone)]
pub struct AppStore {
    posts: Vec<Post>,
    threads: HashMap<String, CommentThread>,
    user: User,
    visiting: Option<User>,
    tab: FeedTab,
    filters: FilterState,
    language: Language,
    prefill: Option<PrefillData>,
    chats: Vec<ChatSession>,
    toast: Option<Toast>,
    events: EventLog,
    tracker: UnlockTracker,
    projector: RadarProjector,
    radar_size: f64,
    toast_duration: Duration,
}

impl AppStore {
    pub fn new(config: &TomlConfig, user: User, posts: Vec<Post>, chats: Vec<ChatSession>) -> Self {
        let threads = posts
            .iter()
            .map(|p| (p.id.clone(), CommentThread::new(&p.id)))
            .collect();
        Self {
            posts,
            threads,
            user,
            visiting: None,
            tab: FeedTab::default(),
            filters: FilterState::default(),
            language: config.language,
            prefill: None,
            chats,
            toast: None,
            events: EventLog::new(config.event_log_capacity),
            tracker: UnlockTracker::new(VarietalCatalog::default()),
            projector: RadarProjector::new(config.radar.projector_config()),
            radar_size: config.radar.size,
            toast_duration: config.toast_duration(),
        }
    }

    /// Store populated with the deterministic mock feed and inbox
    pub fn seeded(config: &TomlConfig, seed: u64, now: DateTime<Utc>) -> Self {
        let mut store = Self::new(
            config,
            seed::mock_user(),
            seed::mock_posts(seed, now),
            seed::mock_chats(now),
        );
        for (post_id, thread) in store.threads.iter_mut() {
            *thread = CommentThread::with_comments(post_id, seed::mock_comments(post_id, now));
        }
        info!(seed, posts = store.posts.len(), "Seeded store");
        store
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn tab(&self) -> FeedTab {
        self.tab
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn catalog(&self) -> &VarietalCatalog {
        self.tracker.catalog()
    }

    pub fn chats(&self) -> &[ChatSession] {
        &self.chats
    }

    pub fn prefill(&self) -> Option<&PrefillData> {
        self.prefill.as_ref()
    }

    pub fn post(&self, post_id: &str) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == post_id)
            .ok_or_else(|| Error::NotFound(format!("post {}", post_id)))
    }

    // ========================================================================
    // Feed
    // ========================================================================

    /// Posts visible under the current tab and filters
    pub fn visible_feed(&self) -> Vec<Post> {
        feed::apply(&self.posts, self.tab, &self.filters)
    }

    pub fn set_tab(&mut self, tab: FeedTab, now: DateTime<Utc>) {
        if tab != self.tab {
            debug!("Feed tab {} -> {}", self.tab, tab);
        }
        self.tab = tab;
        self.feed_changed(now);
    }

    /// Commit a filter selection (the sheet's "confirm")
    pub fn set_filters(&mut self, filters: FilterState, now: DateTime<Utc>) {
        self.filters = filters;
        self.feed_changed(now);
    }

    pub fn clear_filters(&mut self, now: DateTime<Utc>) {
        self.filters.clear();
        self.feed_changed(now);
    }

    fn feed_changed(&mut self, now: DateTime<Utc>) {
        let visible_count = self.visible_feed().len();
        self.events.emit(CremaEvent::FeedFiltersChanged {
            tab: self.tab,
            filters_active: self.filters.is_active(),
            visible_count,
            timestamp: now,
        });
    }

    /// Flip the viewer's like on a post
    pub fn toggle_like(&mut self, post_id: &str, now: DateTime<Utc>) -> Result<&Post> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or_else(|| Error::NotFound(format!("post {}", post_id)))?;

        let post = &mut self.posts[index];
        post.toggle_like();
        self.events.emit(CremaEvent::LikeToggled {
            post_id: post.id.clone(),
            has_liked: post.has_liked,
            likes: post.likes,
            timestamp: now,
        });
        Ok(&self.posts[index])
    }

    // ========================================================================
    // Publishing
    // ========================================================================

    /// Publish a draft as the signed-in user
    ///
    /// The post goes to the top of the feed, the author earns palate points,
    /// and a newly tagged varietal is unlocked with a toast.
    pub fn publish(&mut self, draft: PostDraft, now: DateTime<Utc>) -> PublishReceipt {
        let post_id = format!("p-{}", Uuid::new_v4());
        let post = draft.into_post(post_id.clone(), Author::from_user(&self.user), now);

        let credited = award_publish(&self.user);
        let outcome = self.tracker.on_publish(&credited, &post);
        self.user = outcome.user;

        self.events.emit(CremaEvent::PostPublished {
            post_id: post.id.clone(),
            author_id: post.author.id.clone(),
            varietal_id: post.varietal_id.clone(),
            timestamp: now,
        });

        if let Some(info) = &outcome.unlocked {
            self.toast = Some(Toast {
                message: format!("{}: {}", self.language.unlock_toast(), info.name),
                icon: info.icon.clone(),
                expires_at: now
                    .checked_add_signed(self.toast_duration)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            });
            self.events.emit(CremaEvent::VarietalUnlocked {
                user_id: self.user.id.clone(),
                varietal_id: info.id.clone(),
                display_name: info.name.clone(),
                timestamp: now,
            });
        }

        info!(
            post_id = %post.id,
            palate_score = self.user.palate_score,
            "Published note"
        );
        self.threads.insert(post.id.clone(), CommentThread::new(&post.id));
        self.posts.insert(0, post);
        self.prefill = None;

        PublishReceipt {
            post_id,
            unlocked: outcome.unlocked,
        }
    }

    /// "I drank this too": remember a post's details and start a draft
    pub fn prefill_from(&mut self, post_id: &str) -> Result<PostDraft> {
        let prefill = PrefillData::from_post(self.post(post_id)?);
        let draft = PostDraft::from_prefill(&prefill);
        self.prefill = Some(prefill);
        Ok(draft)
    }

    /// Toast still on screen at `now`, if any
    pub fn active_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible(now))
    }

    /// Forget a toast whose time is up
    pub fn dismiss_expired_toast(&mut self, now: DateTime<Utc>) {
        if self.toast.as_ref().is_some_and(|t| !t.is_visible(now)) {
            self.toast = None;
        }
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Show an author's profile
    ///
    /// Selecting yourself returns to your own profile.
    pub fn open_author(&mut self, author_id: &str) -> Result<&User> {
        if author_id == self.user.id {
            self.visiting = None;
            return Ok(&self.user);
        }

        let author = self
            .posts
            .iter()
            .map(|p| &p.author)
            .find(|a| a.id == author_id)
            .ok_or_else(|| Error::NotFound(format!("author {}", author_id)))?;
        let visitor = seed::visitor_profile(author);
        Ok(&*self.visiting.insert(visitor))
    }

    pub fn close_profile(&mut self) {
        self.visiting = None;
    }

    /// Whoever's profile is on screen
    pub fn profile_user(&self) -> &User {
        self.visiting.as_ref().unwrap_or(&self.user)
    }

    pub fn is_visiting(&self) -> bool {
        self.visiting.is_some()
    }

    pub fn profile_posts(&self) -> Vec<Post> {
        feed::posts_by_author(&self.posts, &self.profile_user().id)
    }

    // ========================================================================
    // Radar
    // ========================================================================

    /// Radar geometry for a post at the configured size
    pub fn radar_for(&self, post_id: &str) -> Result<RadarGeometry> {
        let post = self.post(post_id)?;
        Ok(self.projector.project(&post.flavor_profile, self.radar_size))
    }

    /// Radar geometry for a profile at an explicit size (draft preview)
    pub fn radar_preview(&self, profile: &FlavorProfile, size: f64) -> RadarGeometry {
        self.projector.project(profile, size)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub fn comments(&self, post_id: &str) -> Result<&CommentThread> {
        self.threads
            .get(post_id)
            .ok_or_else(|| Error::NotFound(format!("post {}", post_id)))
    }

    fn thread_mut(&mut self, post_id: &str) -> Result<&mut CommentThread> {
        self.threads
            .get_mut(post_id)
            .ok_or_else(|| Error::NotFound(format!("post {}", post_id)))
    }

    /// Comment on a post as the signed-in user
    ///
    /// Returns the new comment's id, or `None` when the body was blank.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        body: CommentBody,
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let author = Author::from_user(&self.user);
        let thread = self.thread_mut(post_id)?;
        let Some(comment_id) = thread.add(author, body, now).map(|c| c.id.clone()) else {
            return Ok(None);
        };
        self.events.emit(CremaEvent::CommentAdded {
            post_id: post_id.to_string(),
            comment_id: comment_id.clone(),
            root_id: None,
            timestamp: now,
        });
        Ok(Some(comment_id))
    }

    /// Answer a comment or a reply on a post
    pub fn reply_to_comment(
        &mut self,
        post_id: &str,
        target_id: &str,
        body: CommentBody,
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let author = Author::from_user(&self.user);
        let thread = self.thread_mut(post_id)?;
        let Some(comment_id) = thread
            .reply(target_id, author, body, now)?
            .map(|c| c.id.clone())
        else {
            return Ok(None);
        };
        let root_id = thread
            .comments()
            .iter()
            .find(|root| root.replies.iter().any(|r| r.id == comment_id))
            .map(|root| root.id.clone());
        self.events.emit(CremaEvent::CommentAdded {
            post_id: post_id.to_string(),
            comment_id: comment_id.clone(),
            root_id,
            timestamp: now,
        });
        Ok(Some(comment_id))
    }

    /// Flip the viewer's like on a comment; returns the new state
    pub fn toggle_comment_like(&mut self, post_id: &str, comment_id: &str) -> Result<bool> {
        self.thread_mut(post_id)?.toggle_like(comment_id)
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Open a conversation and mark it read
    pub fn open_chat(&mut self, chat_id: &str) -> Result<&ChatSession> {
        let chat = self.chat_mut(chat_id)?;
        chat.mark_read();
        Ok(&*chat)
    }

    /// Send a message; returns false when blank text was ignored
    pub fn send_message(&mut self, chat_id: &str, text: &str, now: DateTime<Utc>) -> Result<bool> {
        let chat = self.chat_mut(chat_id)?;
        let Some(message_id) = chat.send(text, now).map(|m| m.id.clone()) else {
            return Ok(false);
        };
        self.events.emit(CremaEvent::MessageSent {
            chat_id: chat_id.to_string(),
            message_id,
            timestamp: now,
        });
        Ok(true)
    }

    fn chat_mut(&mut self, chat_id: &str) -> Result<&mut ChatSession> {
        self.chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| Error::NotFound(format!("chat {}", chat_id)))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<CremaEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AppStore {
        AppStore::seeded(&TomlConfig::default(), 42, Utc::now())
    }

    #[test]
    fn test_toast_expires_after_configured_duration() {
        let now = Utc::now();
        let mut store = store();
        let receipt = store.publish(
            PostDraft {
                varietal_id: Some("geisha".into()),
                ..PostDraft::default()
            },
            now,
        );
        assert!(receipt.unlocked.is_some());

        let toast = store.active_toast(now).cloned().unwrap();
        assert!(toast.message.ends_with(": Geisha"));
        assert!(store.active_toast(now + Duration::milliseconds(2999)).is_some());
        assert!(store.active_toast(now + Duration::milliseconds(3000)).is_none());

        store.dismiss_expired_toast(now + Duration::seconds(5));
        assert!(store.active_toast(now).is_none());
    }

    #[test]
    fn test_oversized_toast_duration_does_not_overflow() {
        let config = TomlConfig {
            toast_duration_ms: 10_000_000_000_000_000,
            ..TomlConfig::default()
        };
        let now = Utc::now();
        let mut store = AppStore::seeded(&config, 42, now);
        let receipt = store.publish(
            PostDraft {
                varietal_id: Some("geisha".into()),
                ..PostDraft::default()
            },
            now,
        );

        assert!(receipt.unlocked.is_some());
        let toast = store.active_toast(now).cloned().unwrap();
        assert_eq!(toast.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut store = store();
        let now = Utc::now();
        assert!(matches!(store.toggle_like("nope", now), Err(Error::NotFound(_))));
        assert!(matches!(store.prefill_from("nope"), Err(Error::NotFound(_))));
        assert!(matches!(store.open_author("nobody"), Err(Error::NotFound(_))));
        assert!(matches!(store.send_message("c9", "hi", now), Err(Error::NotFound(_))));
        assert!(store.radar_for("nope").is_err());
    }
}
