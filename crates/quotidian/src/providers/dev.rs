//! Developer quotes provider
//!
//! The programming-quotes API rejects cross-origin callers, so requests go
//! through a generic relay. The relay returns the upstream body JSON-encoded
//! as a string under `contents`, which must be parsed a second time to
//! recover the quote object.

use crate::config::providers::{DEV_QUOTES_URL, RELAY_URL};
use crate::data::types::{QuoteMode, QuoteRecord};
use crate::error::{AppError, Result};
use crate::network::HttpClient;

use super::traits::QuoteProvider;

use serde::Deserialize;

// =============================================================================
// Internal API response types (serde)
// =============================================================================

/// Outer relay envelope
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    /// Upstream response body, JSON-encoded as a string
    contents: String,
}

/// Inner programming-quote payload
#[derive(Debug, Deserialize)]
struct DevQuoteBody {
    en: String,
    #[serde(default)]
    author: String,
}

impl RelayEnvelope {
    /// Parse the wrapped upstream body into a record
    ///
    /// The relay hands back whatever the upstream produced, including
    /// error pages; anything that is not a quote object is malformed.
    fn into_record(self) -> Result<QuoteRecord> {
        let body: DevQuoteBody = serde_json::from_str(&self.contents)
            .map_err(|e| AppError::Parse(format!("relay contents is not a dev quote: {}", e)))?;
        Ok(QuoteRecord::new(body.en, body.author))
    }
}

// =============================================================================
// DevQuotesProvider
// =============================================================================

/// Provider for the programming-quotes API, reached through the relay
pub struct DevQuotesProvider {
    client: HttpClient,
    relay_url: String,
    upstream_url: String,
}

impl DevQuotesProvider {
    /// Create a provider using the default relay and upstream
    pub fn new() -> Result<Self> {
        Self::with_urls(RELAY_URL, DEV_QUOTES_URL)
    }

    /// Create a provider with custom endpoints (useful for testing)
    pub fn with_urls(relay_url: impl Into<String>, upstream_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            relay_url: relay_url.into(),
            upstream_url: upstream_url.into(),
        })
    }

    /// Relay request URL with the upstream target encoded into it
    fn request_url(&self) -> String {
        format!(
            "{}?url={}",
            self.relay_url,
            urlencoding::encode(&self.upstream_url)
        )
    }
}

impl QuoteProvider for DevQuotesProvider {
    fn name(&self) -> &'static str {
        "Dev Quotes"
    }

    fn mode(&self) -> QuoteMode {
        QuoteMode::Dev
    }

    fn fetch_random(&self) -> Result<QuoteRecord> {
        let envelope: RelayEnvelope = self.client.get_json_fresh(&self.request_url())?;
        envelope.into_record()
    }
}

// =============================================================================
// Tests
// =============================================================================
