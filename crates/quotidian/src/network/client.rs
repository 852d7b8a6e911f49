//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! user-agent and timeout configuration.

use crate::config::network::{CACHE_BUST_PARAM, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a new client with default Quotidian settings
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;

        Ok(Self { inner })
    }

    /// GET a URL and deserialize the JSON response
    ///
    /// A non-2xx status is an error, not a body to parse.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.inner.get(url).send()?.error_for_status()?;
        let data = response.json::<T>()?;
        Ok(data)
    }

    /// GET a URL with a cache-busting timestamp parameter appended
    ///
    /// The quote APIs sit behind caches that would otherwise hand back the
    /// same quote on every call.
    pub fn get_json_fresh<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json(&cache_busted(url))
    }
}

/// Append the cache-busting timestamp parameter to a URL
fn cache_busted(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{CACHE_BUST_PARAM}={}", now_millis())
}

/// Milliseconds since the Unix epoch
fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
