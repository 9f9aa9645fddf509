//! Journal data models: posts, authors, users and drafts
//!
//! Posts are immutable after publication apart from the like toggle.
//! Drafts carry raw form input; [`PostDraft::into_post`] is the single
//! place where missing form fields receive their defaults.

use crate::flavor::{normalize, FlavorProfile, PartialProfile};
use crate::palate::MAX_PALATE_SCORE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lowest roast level (very light)
pub const MIN_ROAST: u8 = 1;
/// Highest roast level (very dark)
pub const MAX_ROAST: u8 = 5;

pub const DEFAULT_TITLE: &str = "Untitled Note";
pub const DEFAULT_PRODUCT_NAME: &str = "Flavor Exploration";
pub const DEFAULT_REGION: &str = "Africa";
pub const DEFAULT_PROCESS: &str = "Washed";
pub const DEFAULT_METHOD: &str = "Pour Over";
pub const DEFAULT_PRICE_RANGE: &str = "¥35-50";
pub const DEFAULT_ROAST: u8 = 3;

/// Public identity of whoever wrote a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// Official (house) accounts are hidden from the Following tab
    #[serde(default)]
    pub is_official: bool,
}

impl Author {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            is_official: false,
        }
    }
}

/// A published tasting note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub product_name: String,
    /// Coarse growing region (continent), used by the region filter
    pub region: String,
    /// Country or estate of origin
    pub origin: Option<String>,
    /// Catalog id of the varietal, if tagged
    pub varietal_id: Option<String>,
    pub location: Option<String>,
    /// Human-readable distance from the viewer, e.g. "1.2km"
    pub distance: Option<String>,
    pub images: Vec<String>,
    pub author: Author,
    pub likes: u32,
    pub has_liked: bool,
    /// Clamped into `MIN_ROAST..=MAX_ROAST` on deserialization
    #[serde(deserialize_with = "deserialize_roast")]
    pub roast_level: u8,
    pub process: String,
    pub method: String,
    pub flavor_profile: FlavorProfile,
    pub flavors: Vec<String>,
    pub topics: Vec<String>,
    pub price_range: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub rating: Option<u8>,
}

impl Post {
    /// Flip the viewer's like
    ///
    /// Liking adds one to the counter, unliking removes one. Toggling twice
    /// restores the original post. There is no server of record, so the
    /// toggle is applied optimistically and may be repeated freely.
    pub fn toggle_like(&mut self) {
        if self.has_liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes = self.likes.saturating_add(1);
        }
        self.has_liked = !self.has_liked;
    }

    /// True when the post carries any notion of where it was written
    pub fn has_place(&self) -> bool {
        self.location.is_some() || self.distance.is_some()
    }
}

/// Counters shown on a profile header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub posts: u32,
    pub followers: u32,
    pub following: u32,
}

/// Achievement badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub is_locked: bool,
}

/// A journal user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub stats: UserStats,
    /// Engagement score in 0..=100, only ever raised
    #[serde(deserialize_with = "deserialize_palate_score")]
    pub palate_score: u8,
    pub badges: Vec<Badge>,
    /// Revealed varietal ids in unlock order (append-only)
    pub unlocked_varietals: Vec<String>,
}

impl User {
    pub fn has_unlocked(&self, varietal_id: &str) -> bool {
        self.unlocked_varietals.iter().any(|id| id == varietal_id)
    }
}

/// Fields copied from an existing post by "I drank this too"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillData {
    pub product_name: String,
    pub roast_level: u8,
    pub process: String,
    pub method: String,
    pub region: String,
    pub varietal_id: Option<String>,
}

impl PrefillData {
    pub fn from_post(post: &Post) -> Self {
        Self {
            product_name: post.product_name.clone(),
            roast_level: post.roast_level,
            process: post.process.clone(),
            method: post.method.clone(),
            region: post.region.clone(),
            varietal_id: post.varietal_id.clone(),
        }
    }
}

/// Raw add-post form state
///
/// Every field is optional or may be blank; nothing here is validated
/// until [`PostDraft::into_post`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub product_name: Option<String>,
    pub region: Option<String>,
    pub origin: Option<String>,
    pub varietal_id: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub roast_level: Option<i32>,
    pub process: Option<String>,
    pub method: Option<String>,
    pub topics: Vec<String>,
    pub content: String,
    pub flavor_profile: PartialProfile,
}

impl PostDraft {
    /// Start a draft from another post's details
    pub fn from_prefill(prefill: &PrefillData) -> Self {
        Self {
            product_name: Some(prefill.product_name.clone()),
            region: Some(prefill.region.clone()),
            varietal_id: prefill.varietal_id.clone(),
            roast_level: Some(i32::from(prefill.roast_level)),
            process: Some(prefill.process.clone()),
            method: Some(prefill.method.clone()),
            ..Self::default()
        }
    }

    /// Finish the draft into a post owned by `author`
    ///
    /// Blank text fields fall back to their defaults, the roast level is
    /// clamped into range, and the flavor profile is normalized.
    pub fn into_post(self, id: String, author: Author, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: non_blank(self.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            product_name: non_blank(self.product_name)
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            region: non_blank(self.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            origin: non_blank(self.origin),
            varietal_id: non_blank(self.varietal_id),
            location: non_blank(self.location),
            distance: None,
            images: self.images,
            author,
            likes: 0,
            has_liked: false,
            roast_level: self
                .roast_level
                .map(|r| r.clamp(i32::from(MIN_ROAST), i32::from(MAX_ROAST)) as u8)
                .unwrap_or(DEFAULT_ROAST),
            process: non_blank(self.process).unwrap_or_else(|| DEFAULT_PROCESS.to_string()),
            method: non_blank(self.method).unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            flavor_profile: normalize(self.flavor_profile),
            flavors: Vec::new(),
            topics: self.topics,
            price_range: DEFAULT_PRICE_RANGE.to_string(),
            content: self.content,
            created_at,
            rating: None,
        }
    }
}

fn deserialize_roast<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(i64::from(MIN_ROAST), i64::from(MAX_ROAST)) as u8)
}

fn deserialize_palate_score<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(MAX_PALATE_SCORE)) as u8)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: "u1".into(),
            name: "Ai".into(),
            avatar: "a.png".into(),
            is_official: false,
        }
    }

    #[test]
    fn test_empty_draft_gets_defaults() {
        let post = PostDraft::default().into_post("p1".into(), author(), Utc::now());
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(post.region, DEFAULT_REGION);
        assert_eq!(post.method, DEFAULT_METHOD);
        assert_eq!(post.roast_level, DEFAULT_ROAST);
        assert_eq!(post.price_range, DEFAULT_PRICE_RANGE);
        assert_eq!(post.flavor_profile, FlavorProfile::default());
        assert_eq!(post.likes, 0);
        assert!(!post.has_liked);
        assert!(post.varietal_id.is_none());
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let draft = PostDraft {
            title: Some("   ".into()),
            varietal_id: Some("".into()),
            roast_level: Some(9),
            ..PostDraft::default()
        };
        let post = draft.into_post("p1".into(), author(), Utc::now());
        assert_eq!(post.title, DEFAULT_TITLE);
        assert!(post.varietal_id.is_none());
        assert_eq!(post.roast_level, MAX_ROAST);
    }

    #[test]
    fn test_toggle_like_twice_restores() {
        let mut post = PostDraft::default().into_post("p1".into(), author(), Utc::now());
        post.likes = 10;
        let original = post.clone();

        post.toggle_like();
        assert!(post.has_liked);
        assert_eq!(post.likes, 11);

        post.toggle_like();
        assert_eq!(post, original);
    }

    #[test]
    fn test_unlike_at_zero_does_not_underflow() {
        let mut post = PostDraft::default().into_post("p1".into(), author(), Utc::now());
        post.has_liked = true;
        post.toggle_like();
        assert_eq!(post.likes, 0);
        assert!(!post.has_liked);
    }

    #[test]
    fn test_deserialized_roast_is_clamped() {
        let post = PostDraft::default().into_post("p1".into(), author(), Utc::now());
        let mut json = serde_json::to_value(&post).unwrap();

        json["roast_level"] = serde_json::json!(9);
        let back: Post = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back.roast_level, MAX_ROAST);

        json["roast_level"] = serde_json::json!(-3);
        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back.roast_level, MIN_ROAST);
    }

    #[test]
    fn test_deserialized_palate_score_is_clamped() {
        let json = serde_json::json!({
            "id": "u1",
            "name": "Ai",
            "avatar": "",
            "bio": "",
            "stats": { "posts": 1, "followers": 0, "following": 0 },
            "palate_score": 250,
            "badges": [],
            "unlocked_varietals": ["geisha"]
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.palate_score, MAX_PALATE_SCORE);
        assert!(user.has_unlocked("geisha"));
    }

    #[test]
    fn test_prefill_round_trip_through_draft() {
        let mut source = PostDraft::default().into_post("p1".into(), author(), Utc::now());
        source.varietal_id = Some("geisha".into());
        source.roast_level = 2;
        source.method = "Espresso".into();

        let prefill = PrefillData::from_post(&source);
        let post = PostDraft::from_prefill(&prefill).into_post("p2".into(), author(), Utc::now());
        assert_eq!(post.varietal_id.as_deref(), Some("geisha"));
        assert_eq!(post.roast_level, 2);
        assert_eq!(post.method, "Espresso");
    }
}
