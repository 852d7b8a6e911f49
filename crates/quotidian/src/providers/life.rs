//! Life quotes provider
//!
//! Fetches from the life-quotes API, which returns a single JSON object
//! whose field names drift between `quote` and `content` depending on the
//! deployment.

use crate::config::providers::LIFE_QUOTES_URL;
use crate::data::types::{QuoteMode, QuoteRecord};
use crate::error::{AppError, Result};
use crate::network::HttpClient;

use super::traits::QuoteProvider;

use serde::Deserialize;

/// Author used when the API omits one
const UNKNOWN_AUTHOR: &str = "Unknown";

// =============================================================================
// Internal API response types (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
struct LifeQuoteBody {
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

impl LifeQuoteBody {
    /// Map the raw body to a record
    ///
    /// Text comes from `quote`, falling back to `content`; a body carrying
    /// neither is malformed. A missing author becomes "Unknown".
    fn into_record(self) -> Result<QuoteRecord> {
        let quote = self
            .quote
            .or(self.content)
            .ok_or_else(|| AppError::Parse("life quote body has no quote text".to_string()))?;
        let author = self.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Ok(QuoteRecord::new(quote, author))
    }
}

// =============================================================================
// LifeQuotesProvider
// =============================================================================

/// Provider for the general life-quotes API
pub struct LifeQuotesProvider {
    client: HttpClient,
    base_url: String,
}

impl LifeQuotesProvider {
    /// Create a provider using the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(LIFE_QUOTES_URL)
    }

    /// Create a provider with a custom endpoint (useful for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.into(),
        })
    }
}

impl QuoteProvider for LifeQuotesProvider {
    fn name(&self) -> &'static str {
        "Life Quotes"
    }

    fn mode(&self) -> QuoteMode {
        QuoteMode::Life
    }

    fn fetch_random(&self) -> Result<QuoteRecord> {
        let body: LifeQuoteBody = self.client.get_json_fresh(&self.base_url)?;
        body.into_record()
    }
}

// =============================================================================
// Tests
// =============================================================================
