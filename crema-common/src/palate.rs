//! Palate score: engagement points earned by publishing

use crate::models::User;
use serde::{Deserialize, Serialize};

/// Score ceiling
pub const MAX_PALATE_SCORE: u8 = 100;

/// Points awarded per published note
pub const PUBLISH_AWARD: u8 = 2;

/// Title shown next to the score on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PalateLevel {
    Novice,
    Explorer,
    Connoisseur,
    Gourmand,
}

impl PalateLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=19 => PalateLevel::Novice,
            20..=49 => PalateLevel::Explorer,
            50..=79 => PalateLevel::Connoisseur,
            _ => PalateLevel::Gourmand,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PalateLevel::Novice => "Coffee Novice",
            PalateLevel::Explorer => "Flavor Explorer",
            PalateLevel::Connoisseur => "Seasoned Connoisseur",
            PalateLevel::Gourmand => "Community Gourmand",
        }
    }
}

impl std::fmt::Display for PalateLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Raise a score by `points`, stopping at the ceiling
pub fn raise(score: u8, points: u8) -> u8 {
    score.saturating_add(points).min(MAX_PALATE_SCORE)
}

/// Credit a user for one publication
///
/// Bumps the post counter and awards [`PUBLISH_AWARD`] palate points.
pub fn award_publish(user: &User) -> User {
    let mut next = user.clone();
    next.stats.posts = next.stats.posts.saturating_add(1);
    next.palate_score = raise(user.palate_score, PUBLISH_AWARD);
    next
}
