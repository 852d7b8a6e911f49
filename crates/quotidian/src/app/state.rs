//! Shared application state and commands
//!
//! `AppCommand` is the command type frontends send to the controller.
//! `AppSnapshot` is the shared state frontends render from.

use crate::data::types::{QuoteMode, QuoteRecord};

/// Fetch lifecycle of the displayed quote
///
/// There is no distinct failed phase: a failed fetch lands in `Loaded`
/// carrying the sentinel record (see [`QuoteRecord::failed`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The latest fetch completed and its record is on display
    Loaded,
}

/// Commands sent by frontends to the app controller
#[derive(Debug)]
pub enum AppCommand {
    // Quote display
    /// Fetch a fresh quote in the given mode
    Fetch(QuoteMode),

    // Favourites
    /// Save the currently displayed quote
    SaveFavorite,
    /// Remove every favourite with this quote text
    RemoveFavorite(String),

    // Lifecycle
    /// Shut down the controller loop
    Shutdown,

    /// Internal: a fetch finished on a worker thread (not sent by frontends)
    InternalFetchDone {
        generation: u64,
        record: QuoteRecord,
    },
}

/// Snapshot of app state shared between the controller and frontends
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    /// Where the current fetch stands
    pub phase: FetchPhase,
    /// The displayed record (None until the first fetch completes)
    pub quote: Option<QuoteRecord>,
    /// Active quote category
    pub mode: QuoteMode,
    /// Favourites in insertion order, mirrored for display
    pub favorites: Vec<QuoteRecord>,
    /// Transient user feedback ("Added to favourites." and friends)
    pub notice: Option<String>,
}

impl AppSnapshot {
    /// Whether the displayed record is the fetch-failure sentinel
    pub fn fetch_failed(&self) -> bool {
        self.quote.as_ref().is_some_and(|q| q.is_failed())
    }

    /// Whether a save would currently be accepted
    ///
    /// Saving is blocked while loading, before the first fetch, and when
    /// the display holds the failure sentinel.
    pub fn can_save(&self) -> bool {
        self.phase == FetchPhase::Loaded && self.quote.as_ref().is_some_and(|q| !q.is_failed())
    }
}
