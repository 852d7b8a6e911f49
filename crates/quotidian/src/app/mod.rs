//! Application controller and state
//!
//! The command loop connecting frontends to providers and favourites.

pub mod controller;
pub mod state;

// Re-exports
pub use controller::AppController;
pub use state::{AppCommand, AppSnapshot, FetchPhase};
