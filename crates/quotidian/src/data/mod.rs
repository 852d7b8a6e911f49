//! Data persistence
//!
//! Favourites, settings, and the storage helpers beneath them.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::FavoritesBook;
pub use settings::Settings;
pub use types::{QuoteMode, QuoteRecord};
