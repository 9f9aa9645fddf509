//! crema-ui library - terminal front end for the Crema tasting journal
//!
//! Owns the session state ([`AppStore`]) and the mock content it starts
//! from. All domain rules live in `crema_common`.

pub mod render;
pub mod seed;
pub mod store;

pub use store::{AppStore, PublishReceipt, Toast};
