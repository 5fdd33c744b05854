//! Per-screen state holders.
//!
//! Each view-model is plain owned state mutated from the UI loop; nothing
//! here is shared across threads.

mod favorites;
mod feed;
mod player;
mod settings;

pub use favorites::InMemoryFavoriteStore;
pub use feed::{FeedTab, FeedViewModel};
pub use player::{PlayerState, PlayerViewModel};
pub use settings::SettingsViewModel;
