//! Price-index client (CoinGecko `simple/price`).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{endpoint, ApiError};

/// Current USD price of one asset.
///
/// `usd_price` is `None` when the upstream answered successfully but does not
/// know the symbol. The number is kept as the upstream wrote it, so `65000`
/// and `65000.0` stay distinguishable and large integers keep every digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub symbol: String,
    pub usd_price: Option<serde_json::Number>,
}

/// Source of asset prices
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the USD price for `symbol` with a single request.
    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, ApiError>;
}

#[derive(Deserialize)]
struct CurrencyAmounts {
    usd: Option<serde_json::Number>,
}

/// Client for `GET <base>/simple/price?ids=<symbol>&vs_currencies=usd`
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CoinGeckoClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn price_url(&self, symbol: &str) -> Result<Url, ApiError> {
        let mut url = endpoint(&self.base_url, "simple/price")?;
        url.query_pairs_mut()
            .append_pair("ids", symbol)
            .append_pair("vs_currencies", "usd");
        Ok(url)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, ApiError> {
        let url = self.price_url(symbol)?;
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            log::debug!("Price API returned status {} for {}", response.status(), symbol);
            return Err(ApiError::Status(response.status()));
        }

        let mut data: HashMap<String, CurrencyAmounts> = response.json().await?;
        let usd_price = data.remove(symbol).and_then(|amounts| amounts.usd);

        Ok(PriceQuote {
            symbol: symbol.to_string(),
            usd_price,
        })
    }
}
