//! Quote provider trait
//!
//! Defines the interface that all upstream quote sources must implement.

use crate::data::types::{QuoteMode, QuoteRecord};
use crate::error::Result;

/// A source of random quotes
///
/// Each implementation owns one upstream API shape and is solely
/// responsible for mapping it to the canonical [`QuoteRecord`]. Adding a
/// new quote category means adding one implementation and registering it.
pub trait QuoteProvider: Send + Sync {
    /// Display name for the provider (e.g., "Life Quotes")
    fn name(&self) -> &'static str;

    /// The mode this provider serves (used by the registry to route fetches)
    fn mode(&self) -> QuoteMode;

    /// Fetch one random quote
    ///
    /// Every call issues a fresh request; results are never cached.
    fn fetch_random(&self) -> Result<QuoteRecord>;
}
