//! News-aggregator client (CryptoPanic `posts`).
//!
//! The auth token travels in the query string, so transport errors are
//! stripped of their URL before they leave this module.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use super::{endpoint, ApiError};

/// Upper bound on headlines returned per request
pub const MAX_NEWS_ITEMS: usize = 5;

/// One headline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

/// Source of trending headlines
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetches at most [`MAX_NEWS_ITEMS`] headlines in upstream order.
    ///
    /// An empty vector means the upstream answered with no results.
    async fn get_latest_news(&self) -> Result<Vec<NewsItem>, ApiError>;
}

#[derive(Deserialize)]
struct PostsResponse {
    /// Kept raw so entries past the first [`MAX_NEWS_ITEMS`] are never inspected
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Client for `GET <base>/posts/?auth_token=<token>&filter=trending`
#[derive(Debug, Clone)]
pub struct CryptoPanicClient {
    http: reqwest::Client,
    base_url: Url,
    auth_token: SecretString,
}

impl CryptoPanicClient {
    pub fn new(http: reqwest::Client, base_url: Url, auth_token: SecretString) -> Self {
        Self {
            http,
            base_url,
            auth_token,
        }
    }

    fn posts_url(&self) -> Result<Url, ApiError> {
        let mut url = endpoint(&self.base_url, "posts/")?;
        url.query_pairs_mut()
            .append_pair("auth_token", self.auth_token.expose_secret())
            .append_pair("filter", "trending");
        Ok(url)
    }
}

#[async_trait]
impl NewsSource for CryptoPanicClient {
    async fn get_latest_news(&self) -> Result<Vec<NewsItem>, ApiError> {
        let url = self.posts_url()?;
        let response = self.http.get(url).send().await.map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            log::debug!("News API returned status {}", response.status());
            return Err(ApiError::Status(response.status()));
        }

        let data: PostsResponse = response.json().await.map_err(|e| e.without_url())?;

        let items = data
            .results
            .into_iter()
            .take(MAX_NEWS_ITEMS)
            .map(serde_json::from_value::<NewsItem>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}
