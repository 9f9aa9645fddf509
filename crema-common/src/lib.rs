//! # Crema Common Library
//!
//! Domain core of the Crema coffee-tasting journal, shared by every front end:
//! - Flavor profile model and normalization
//! - Flavor radar projection and SVG rendering
//! - Feed tab and filter composition
//! - Varietal catalog and unlock tracking
//! - Palate score, comment threads, chat sessions, event log
//! - Configuration loading
//!
//! Everything except configuration loading is pure and synchronous.

pub mod catalog;
pub mod chat;
pub mod comments;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod flavor;
pub mod i18n;
pub mod models;
pub mod palate;
pub mod radar;
pub mod unlock;

pub use catalog::{VarietalCatalog, VarietalInfo, VARIETALS};
pub use comments::{Comment, CommentBody, CommentThread};
pub use error::{Error, Result};
pub use feed::{FeedFilter, FeedTab, FilterState};
pub use flavor::{normalize, FlavorAxis, FlavorProfile, PartialProfile};
pub use i18n::Language;
pub use models::{Author, Post, PostDraft, User};
pub use radar::{RadarGeometry, RadarProjector};
pub use unlock::{UnlockOutcome, UnlockTracker};
