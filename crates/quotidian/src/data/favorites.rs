//! Favourites management
//!
//! The persisted collection of saved quotes.

use crate::data::storage;
use crate::data::types::QuoteRecord;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Favourites data file name
const FAVOURITES_FILE: &str = "favourites.json";

/// The saved-quotes collection
///
/// Kept in insertion order and persisted as a flat JSON array of records,
/// nothing else. Identity is the quote text alone: [`FavoritesBook::add`]
/// refuses a record whose text is already present, and
/// [`FavoritesBook::remove`] deletes every record with the given text.
#[derive(Debug, Default)]
pub struct FavoritesBook {
    records: Vec<QuoteRecord>,
}

impl FavoritesBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Default location of the favourites slot
    pub fn default_path() -> Result<PathBuf> {
        storage::data_path(FAVOURITES_FILE)
    }

    /// Load from a specific path
    ///
    /// Never fails: a missing, empty, or corrupt file yields an empty
    /// book. Corrupt content is logged and left on disk untouched until
    /// the next save overwrites it.
    pub fn load_from(path: &Path) -> Self {
        match storage::load_from::<Vec<QuoteRecord>>(path) {
            Ok(Some(records)) => Self { records },
            Ok(None) => Self::new(),
            Err(e) => {
                warn!("discarding unreadable favourites at {:?}: {}", path, e);
                Self::new()
            }
        }
    }

    /// Persist to a specific path
    ///
    /// Always rewrites the whole collection, even when nothing changed
    /// since the last save.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, &self.records)
    }

    /// Append a record unless its quote text is already saved
    ///
    /// Returns true if the record was appended, false for a duplicate.
    /// A duplicate is a normal outcome, not an error, and the author
    /// plays no part in the comparison.
    pub fn add(&mut self, record: QuoteRecord) -> bool {
        if self.records.iter().any(|r| r.same_quote(&record)) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Remove every record whose quote text equals `quote_text`
    ///
    /// Returns the number of records removed; zero when nothing matched.
    pub fn remove(&mut self, quote_text: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.quote != quote_text);
        before - self.records.len()
    }

    /// Whether any record has this exact quote text
    pub fn contains(&self, quote_text: &str) -> bool {
        self.records.iter().any(|r| r.quote == quote_text)
    }

    /// All records in insertion order
    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    /// Number of saved quotes
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the book has no saved quotes
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
