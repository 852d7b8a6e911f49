//! Quote providers
//!
//! Upstream sources for random quotes, one per [`QuoteMode`].

pub mod dev;
pub mod life;
pub mod traits;

// Re-exports
pub use dev::DevQuotesProvider;
pub use life::LifeQuotesProvider;
pub use traits::QuoteProvider;

use crate::data::types::{QuoteMode, QuoteRecord};
use crate::error::{AppError, Result};
use tracing::warn;

/// Registry of available quote providers
///
/// Routes each fetch to the provider registered for the requested mode.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(LifeQuotesProvider::new()?));
        registry.register(Box::new(DevQuotesProvider::new()?));
        Ok(registry)
    }

    /// Register a provider
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Get the provider serving a mode
    pub fn get(&self, mode: QuoteMode) -> Option<&dyn QuoteProvider> {
        self.providers
            .iter()
            .find(|p| p.mode() == mode)
            .map(|p| p.as_ref())
    }

    /// Fetch one quote in the given mode
    ///
    /// Fails when no provider serves the mode or the fetch itself fails.
    pub fn fetch(&self, mode: QuoteMode) -> Result<QuoteRecord> {
        let provider = self.get(mode).ok_or_else(|| {
            AppError::Config(format!("no provider registered for mode '{}'", mode))
        })?;
        provider.fetch_random()
    }

    /// Fetch one quote, converting any failure into the sentinel record
    ///
    /// This is the boundary the UI calls through: network errors, bad
    /// statuses, and malformed payloads all come back as the displayable
    /// failure record instead of propagating.
    pub fn fetch_or_fallback(&self, mode: QuoteMode) -> QuoteRecord {
        match self.fetch(mode) {
            Ok(record) => record,
            Err(e) => {
                warn!("quote fetch failed ({}): {}", mode, e);
                QuoteRecord::failed()
            }
        }
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
