//! Varietal unlock tracking
//!
//! Tagging a published post with a varietal reveals that specimen in the
//! author's collection. The transition is monotonic: ids are only ever
//! appended to `unlocked_varietals`, never reordered or removed, and a
//! varietal already present is a no-op.

use crate::catalog::{VarietalCatalog, VarietalInfo};
use crate::models::{Post, User};
use tracing::{debug, info, warn};

/// Result of running the tracker on one publication
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockOutcome {
    /// The author after the transition (unchanged on no-op)
    pub user: User,
    /// Newly revealed varietal, for the caller's one-shot notification
    pub unlocked: Option<VarietalInfo>,
}

/// Decides whether a publication reveals a new varietal
#[derive(Debug, Clone, Default)]
pub struct UnlockTracker {
    catalog: VarietalCatalog,
}

impl UnlockTracker {
    pub fn new(catalog: VarietalCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &VarietalCatalog {
        &self.catalog
    }

    /// Apply one publication to its author
    ///
    /// Returns a new `User`; the input is left untouched so the caller can
    /// commit the result through its own state container. Ids missing from
    /// the catalog are ignored, keeping the unlocked set a subset of it.
    pub fn on_publish(&self, user: &User, post: &Post) -> UnlockOutcome {
        let unchanged = || UnlockOutcome {
            user: user.clone(),
            unlocked: None,
        };

        let Some(varietal_id) = post.varietal_id.as_deref() else {
            return unchanged();
        };

        if user.has_unlocked(varietal_id) {
            debug!(user_id = %user.id, varietal_id, "Varietal already unlocked");
            return unchanged();
        }

        let Some(info) = self.catalog.find(varietal_id) else {
            warn!(
                user_id = %user.id,
                post_id = %post.id,
                varietal_id,
                "Post tagged with unknown varietal, not unlocking"
            );
            return unchanged();
        };

        let mut next = user.clone();
        next.unlocked_varietals.push(info.id.clone());
        info!(user_id = %user.id, varietal_id, "Unlocked varietal {}", info.name);

        UnlockOutcome {
            user: next,
            unlocked: Some(info.clone()),
        }
    }
}
