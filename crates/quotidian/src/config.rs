//! Configuration constants for Quotidian

/// Application metadata
pub mod app {
    /// Application name (used for the config directory)
    pub const NAME: &str = "quotidian";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Quotidian/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;

    /// Query parameter carrying the current timestamp so intermediaries
    /// cannot serve a cached response
    pub const CACHE_BUST_PARAM: &str = "t";
}

/// Upstream quote APIs
pub mod providers {
    /// Life quotes endpoint (returns one random quote per request)
    pub const LIFE_QUOTES_URL: &str = "https://quotes-api-self.vercel.app/quote";

    /// Developer quotes endpoint (reached through the relay)
    pub const DEV_QUOTES_URL: &str = "https://programming-quotes-api.herokuapp.com/quotes/random";

    /// Cross-origin relay that wraps the upstream response in a JSON envelope
    pub const RELAY_URL: &str = "https://api.allorigins.win/get";
}
