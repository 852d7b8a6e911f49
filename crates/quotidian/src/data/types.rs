//! Common data types
//!
//! The quote record and mode shared by providers, favourites, and the
//! application state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quote text of the record displayed when a fetch fails
pub const FAILED_QUOTE_TEXT: &str = "Failed to load quote.";

// =============================================================================
// QuoteRecord
// =============================================================================

/// A quote with its author
///
/// The one record type used throughout the application: provider results,
/// the displayed quote, and persisted favourites all share it. There is no
/// identifier field; two records are the same quote when their `quote`
/// texts are equal (see [`QuoteRecord::same_quote`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Quote text
    pub quote: String,
    /// Author name (may be empty)
    pub author: String,
}

impl QuoteRecord {
    /// Create a new record
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
        }
    }

    /// The sentinel record shown when a fetch fails
    ///
    /// Failure is a displayable value rather than an error: the UI renders
    /// it like any other quote, and save actions refuse it.
    pub fn failed() -> Self {
        Self {
            quote: FAILED_QUOTE_TEXT.to_string(),
            author: String::new(),
        }
    }

    /// Whether this record is the fetch-failure sentinel
    pub fn is_failed(&self) -> bool {
        self.quote == FAILED_QUOTE_TEXT
    }

    /// Identity comparison: quote text only, exact and case-sensitive
    ///
    /// The author is deliberately not part of the key; favourites
    /// deduplication and removal both work on quote text alone.
    pub fn same_quote(&self, other: &QuoteRecord) -> bool {
        self.quote == other.quote
    }
}

// =============================================================================
// QuoteMode
// =============================================================================

/// Upstream quote category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// General life quotes
    #[default]
    Life,
    /// Programming quotes
    Dev,
}

impl QuoteMode {
    /// The other mode (for toggling in the UI)
    pub fn toggled(self) -> Self {
        match self {
            QuoteMode::Life => QuoteMode::Dev,
            QuoteMode::Dev => QuoteMode::Life,
        }
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            QuoteMode::Life => "life",
            QuoteMode::Dev => "dev",
        }
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuoteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "life" => Ok(QuoteMode::Life),
            "dev" => Ok(QuoteMode::Dev),
            other => Err(format!("unknown mode '{other}' (expected 'life' or 'dev')")),
        }
    }
}
