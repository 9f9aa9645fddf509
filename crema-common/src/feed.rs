//! Feed composition: tab selection and multi-criteria filters
//!
//! The visible feed is the post collection filtered by a conjunction of
//! independent clauses. Filtering never reorders; posts keep their input
//! order. An empty selection on any filter axis means "no constraint on
//! that axis", never "exclude everything".

use crate::models::{Post, MAX_ROAST, MIN_ROAST};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, warn};

/// Primary coarse filter at the top of the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedTab {
    /// People the user follows; official accounts are excluded
    Following,
    /// Everything
    #[default]
    Discover,
    /// Posts tagged with a location or distance
    Local,
}

impl FeedTab {
    pub const ALL: [FeedTab; 3] = [FeedTab::Following, FeedTab::Discover, FeedTab::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedTab::Following => "Following",
            FeedTab::Discover => "Discover",
            FeedTab::Local => "Local",
        }
    }

    /// Tab clause of the feed predicate
    pub fn admits(&self, post: &Post) -> bool {
        match self {
            FeedTab::Following => !post.author.is_official,
            FeedTab::Discover => true,
            FeedTab::Local => post.has_place(),
        }
    }
}

impl FromStr for FeedTab {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedTab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown feed tab: {}", s)))
    }
}

impl std::fmt::Display for FeedTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Roast, method and region selections from the filter sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub roasts: BTreeSet<u8>,
    pub methods: BTreeSet<String>,
    pub regions: BTreeSet<String>,
}

impl FilterState {
    /// Select or deselect a roast level
    ///
    /// Levels outside 1..=5 are ignored.
    pub fn toggle_roast(&mut self, level: u8) {
        if !(MIN_ROAST..=MAX_ROAST).contains(&level) {
            warn!(level, "Ignoring roast level outside {}..={}", MIN_ROAST, MAX_ROAST);
            return;
        }
        if !self.roasts.remove(&level) {
            self.roasts.insert(level);
        }
    }

    pub fn toggle_method(&mut self, method: &str) {
        toggle(&mut self.methods, method);
    }

    pub fn toggle_region(&mut self, region: &str) {
        toggle(&mut self.regions, region);
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when any axis constrains the feed
    pub fn is_active(&self) -> bool {
        !(self.roasts.is_empty() && self.methods.is_empty() && self.regions.is_empty())
    }

    /// Roast, method and region clauses (tab excluded)
    pub fn admits(&self, post: &Post) -> bool {
        (self.roasts.is_empty() || self.roasts.contains(&post.roast_level))
            && (self.methods.is_empty() || self.methods.contains(&post.method))
            && (self.regions.is_empty() || self.regions.contains(&post.region))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Feed predicate for one tab and filter selection
#[derive(Debug, Clone, Copy)]
pub struct FeedFilter<'a> {
    tab: FeedTab,
    filters: &'a FilterState,
}

impl<'a> FeedFilter<'a> {
    pub fn new(tab: FeedTab, filters: &'a FilterState) -> Self {
        Self { tab, filters }
    }

    /// AND of the tab clause and the three filter clauses
    pub fn matches(&self, post: &Post) -> bool {
        self.tab.admits(post) && self.filters.admits(post)
    }

    /// Visible subset of `posts`, in input order
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let visible: Vec<Post> = posts.iter().filter(|p| self.matches(p)).cloned().collect();
        debug!(
            tab = self.tab.as_str(),
            total = posts.len(),
            visible = visible.len(),
            "Feed filtered"
        );
        visible
    }
}

/// Visible subset of `posts` for `tab` and `filters`, in input order
///
/// Pure and idempotent: applying the result again changes nothing.
/// `Discover` with no filter selections is the identity.
pub fn apply(posts: &[Post], tab: FeedTab, filters: &FilterState) -> Vec<Post> {
    FeedFilter::new(tab, filters).apply(posts)
}

/// Posts written by one author, in input order
pub fn posts_by_author(posts: &[Post], author_id: &str) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.author.id == author_id)
        .cloned()
        .collect()
}
