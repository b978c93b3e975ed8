//! Clients for the upstream HTTP APIs
//!
//! - `price`: current USD price of a single asset (CoinGecko simple price)
//! - `news`: trending headlines (CryptoPanic posts)
//!
//! Both clients perform exactly one request per call and report failures as
//! [`ApiError`]; deciding what to tell the user is left to the router.

pub mod news;
pub mod price;

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub use news::{CryptoPanicClient, NewsItem, NewsSource, MAX_NEWS_ITEMS};
pub use price::{CoinGeckoClient, PriceQuote, PriceSource};

/// Failure to obtain a usable response from an upstream API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed with status: {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Builds the HTTP client shared by the API clients.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Appends `path` to `base`, keeping any path the base already has.
///
/// `Url::join` would drop the last segment of a base without a trailing slash
/// (`.../api/v3` + `simple/price` → `.../api/simple/price`).
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
}
