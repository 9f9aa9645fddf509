//! Integration tests for the session store
//!
//! Drive `AppStore` the way the front end does and check the resulting
//! feed, user, inbox and event stream.

use chrono::{Duration, TimeZone, Utc};
use crema_common::config::TomlConfig;
use crema_common::events::CremaEvent;
use crema_common::feed::{FeedTab, FilterState};
use crema_common::models::PostDraft;
use crema_common::comments::CommentBody;
use crema_common::{FlavorAxis, PartialProfile};
use crema_ui::AppStore;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
}

fn store() -> AppStore {
    AppStore::seeded(&TomlConfig::default(), 42, fixed_now())
}

fn draft_tagged(varietal: &str) -> PostDraft {
    PostDraft {
        title: Some(format!("{} tasting", varietal)),
        varietal_id: Some(varietal.to_string()),
        ..PostDraft::default()
    }
}

#[test]
fn test_like_twice_restores_post() {
    let mut store = store();
    let before = store.post("p3").unwrap().clone();

    let liked = store.toggle_like("p3", fixed_now()).unwrap().clone();
    assert!(liked.has_liked);
    assert_eq!(liked.likes, before.likes + 1);

    store.toggle_like("p3", fixed_now()).unwrap();
    assert_eq!(store.post("p3").unwrap(), &before);

    let events = store.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.event_type() == "LikeToggled"));
}

#[test]
fn test_publish_prepends_and_awards_palate() {
    let mut store = store();
    let count = store.posts().len();
    let score = store.user().palate_score;
    let posts = store.user().stats.posts;

    let receipt = store.publish(draft_tagged("typica"), fixed_now());

    assert_eq!(store.posts().len(), count + 1);
    assert_eq!(store.posts()[0].id, receipt.post_id);
    assert_eq!(store.posts()[0].author.id, store.user().id);
    assert_eq!(store.user().palate_score, score + 2);
    assert_eq!(store.user().stats.posts, posts + 1);
    assert_eq!(store.visible_feed()[0].id, receipt.post_id);
}

#[test]
fn test_unlock_geisha_then_bourbon() {
    let mut store = store();
    assert!(!store.user().has_unlocked("geisha"));

    let first = store.publish(draft_tagged("geisha"), fixed_now());
    assert_eq!(first.unlocked.map(|v| v.id), Some("geisha".to_string()));

    let second = store.publish(draft_tagged("bourbon"), fixed_now());
    assert_eq!(second.unlocked.map(|v| v.name), Some("Bourbon".to_string()));
    assert_eq!(
        store.user().unlocked_varietals,
        vec!["sl28", "caturra", "geisha", "bourbon"]
    );

    // Already collected: no toast, no unlock event
    let events_before = store.drain_events().len();
    assert_eq!(events_before, 4);
    let again = store.publish(draft_tagged("geisha"), fixed_now());
    assert!(again.unlocked.is_none());
    let events = store.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], CremaEvent::PostPublished { .. }));
}

#[test]
fn test_unknown_varietal_is_ignored() {
    let mut store = store();
    let before = store.user().unlocked_varietals.clone();

    let receipt = store.publish(draft_tagged("liberica"), fixed_now());
    assert!(receipt.unlocked.is_none());
    assert_eq!(store.user().unlocked_varietals, before);
    assert!(store.active_toast(fixed_now()).is_none());
}

#[test]
fn test_publish_normalizes_model_profile() {
    let mut store = store();
    let draft = PostDraft {
        flavor_profile: PartialProfile::from_model_output(
            "Sure! ```json\n{\"acidity\": 7, \"sweetness\": 3.6, \"body\": 0}\n```",
        ),
        ..PostDraft::default()
    };
    let receipt = store.publish(draft, fixed_now());
    let profile = store.post(&receipt.post_id).unwrap().flavor_profile;

    assert_eq!(profile.get(FlavorAxis::Acidity), 5);
    assert_eq!(profile.get(FlavorAxis::Sweetness), 4);
    assert_eq!(profile.get(FlavorAxis::Body), 1);
    assert_eq!(profile.get(FlavorAxis::Bitterness), 2);
    assert_eq!(profile.get(FlavorAxis::Aftertaste), 3);
}

#[test]
fn test_local_tab_with_roast_filter() {
    let mut store = store();
    let mut filters = FilterState::default();
    filters.toggle_roast(3);

    store.set_tab(FeedTab::Local, fixed_now());
    store.set_filters(filters, fixed_now());

    let visible = store.visible_feed();
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|p| p.has_place() && p.roast_level == 3));

    match store.drain_events().last() {
        Some(CremaEvent::FeedFiltersChanged {
            tab,
            filters_active,
            visible_count,
            ..
        }) => {
            assert_eq!(*tab, FeedTab::Local);
            assert!(*filters_active);
            assert_eq!(*visible_count, visible.len());
        }
        other => panic!("unexpected event {:?}", other),
    }

    store.clear_filters(fixed_now());
    assert_eq!(
        store.visible_feed().len(),
        store.posts().iter().filter(|p| p.has_place()).count()
    );
}

#[test]
fn test_following_tab_hides_official_posts() {
    let mut store = store();
    store.set_tab(FeedTab::Following, fixed_now());
    let visible = store.visible_feed();
    assert!(visible.iter().all(|p| !p.author.is_official));
    assert!(visible.len() < store.posts().len());
}

#[test]
fn test_prefill_then_publish_clears_prefill() {
    let mut store = store();
    let source = store.post("p4").unwrap().clone();

    let draft = store.prefill_from("p4").unwrap();
    assert!(store.prefill().is_some());
    assert_eq!(draft.method.as_deref(), Some(source.method.as_str()));

    let receipt = store.publish(draft, fixed_now());
    assert!(store.prefill().is_none());

    let post = store.post(&receipt.post_id).unwrap();
    assert_eq!(post.region, source.region);
    assert_eq!(post.roast_level, source.roast_level);
    assert_eq!(post.varietal_id, source.varietal_id);
}

#[test]
fn test_open_author_and_own_profile() {
    let mut store = store();
    let author_id = store.post("p1").unwrap().author.id.clone();

    let visitor = store.open_author(&author_id).unwrap().clone();
    assert_eq!(visitor.id, author_id);
    assert!(store.is_visiting());
    assert!(store
        .profile_posts()
        .iter()
        .all(|p| p.author.id == author_id));

    let me = store.user().id.clone();
    store.open_author(&me).unwrap();
    assert!(!store.is_visiting());
    assert!(store.profile_posts().is_empty());

    store.publish(PostDraft::default(), fixed_now());
    assert_eq!(store.profile_posts().len(), 1);
}

#[test]
fn test_toast_auto_dismisses() {
    let config = TomlConfig {
        toast_duration_ms: 1000,
        ..TomlConfig::default()
    };
    let mut store = AppStore::seeded(&config, 42, fixed_now());
    store.publish(draft_tagged("pacamara"), fixed_now());

    assert!(store.active_toast(fixed_now()).is_some());
    assert!(store
        .active_toast(fixed_now() + Duration::milliseconds(999))
        .is_some());
    assert!(store
        .active_toast(fixed_now() + Duration::seconds(1))
        .is_none());
}

#[test]
fn test_stranger_chat_restricted_until_reply() {
    let mut store = store();
    assert!(store.open_chat("c2").unwrap().is_restricted());

    assert!(!store.send_message("c2", "   ", fixed_now()).unwrap());
    assert!(store.chats().iter().any(|c| c.id == "c2" && c.is_restricted()));

    assert!(store
        .send_message("c2", "Ratio 1:15 at 92°C", fixed_now())
        .unwrap());
    let chat = store.chats().iter().find(|c| c.id == "c2").unwrap();
    assert!(!chat.is_restricted());
    assert_eq!(chat.last_message, "Ratio 1:15 at 92°C");

    let events = store.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], CremaEvent::MessageSent { .. }));
}

#[test]
fn test_open_chat_marks_read() {
    let mut store = store();
    assert_eq!(store.open_chat("c3").unwrap().unread_count, 0);
}

#[test]
fn test_radar_uses_configured_size() {
    let store = store();
    let geometry = store.radar_for("p1").unwrap();
    assert_eq!(geometry.size, 200.0);
    assert!((geometry.radius - 65.0).abs() < 1e-9);
    assert_eq!(geometry.polygon.len(), 5);
}

#[test]
fn test_seeded_posts_have_discussions() {
    let store = store();
    let thread = store.comments("p1").unwrap();
    assert_eq!(thread.comments().len(), 3);
    assert_eq!(thread.len(), 4);
    assert!(store.comments("missing").is_err());
}

#[test]
fn test_comment_and_nested_reply() {
    let mut store = store();
    let now = fixed_now();

    let id = store
        .add_comment("p2", CommentBody::text("Bright and clean"), now)
        .unwrap()
        .unwrap();
    assert!(store
        .add_comment("p2", CommentBody::text("  "), now)
        .unwrap()
        .is_none());

    // Answer the official reply under the first comment
    let reply_id = store
        .reply_to_comment("p2", "p2-c1-r1", CommentBody::text("Will try"), now)
        .unwrap()
        .unwrap();
    let thread = store.comments("p2").unwrap();
    let root = &thread.comments()[0];
    assert_eq!(root.replies.last().unwrap().id, reply_id);
    assert_eq!(
        root.replies.last().unwrap().display_text(),
        "@Crema Official: Will try"
    );
    assert_eq!(thread.comments().last().unwrap().id, id);
    assert_eq!(thread.comments().last().unwrap().author.id, store.user().id);

    let events = store.drain_events();
    assert_eq!(events.len(), 2);
    match &events[1] {
        CremaEvent::CommentAdded { root_id, .. } => {
            assert_eq!(root_id.as_deref(), Some("p2-c1"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_comment_like_toggle() {
    let mut store = store();
    assert!(store.toggle_comment_like("p1", "p1-c2").unwrap());
    let thread = store.comments("p1").unwrap();
    assert_eq!(thread.like_count(&thread.comments()[1]), 9);

    assert!(!store.toggle_comment_like("p1", "p1-c2").unwrap());
    assert!(store.toggle_comment_like("p1", "nope").is_err());
    assert!(store.toggle_comment_like("nope", "p1-c2").is_err());
}

#[test]
fn test_published_post_starts_with_empty_thread() {
    let mut store = store();
    let receipt = store.publish(PostDraft::default(), fixed_now());
    assert!(store.comments(&receipt.post_id).unwrap().is_empty());
}
