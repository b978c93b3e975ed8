//! Mock price and news APIs
//!
//! One wiremock server hosts both upstreams under the same path prefixes the
//! real services use, so the router is built through the normal config path.

use coinbot::core::config::{keys, Config};
use coinbot::router::CommandRouter;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PRICE_PATH: &str = "/api/v3/simple/price";
pub const NEWS_PATH: &str = "/api/v1/posts/";

/// Mock upstream APIs
pub struct Upstream {
    pub server: MockServer,
}

impl Upstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Configuration pointing both API clients at the mock server
    pub fn config(&self) -> Config {
        let price_url = format!("{}/api/v3", self.server.uri());
        let news_url = format!("{}/api/v1", self.server.uri());

        Config::from_lookup(|key| match key {
            keys::TELEGRAM_BOT_TOKEN => Some("123456:TEST".to_string()),
            keys::CRYPTO_NEWS_API_KEY => Some("test-news-key".to_string()),
            keys::PRICE_API_URL => Some(price_url.clone()),
            keys::NEWS_API_URL => Some(news_url.clone()),
            keys::HTTP_TIMEOUT_SECS => Some("5".to_string()),
            _ => None,
        })
        .expect("test config should be valid")
    }

    pub fn router(&self) -> CommandRouter {
        CommandRouter::from_config(&self.config()).expect("Failed to build router")
    }

    pub async fn mock_price(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(PRICE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_price_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(PRICE_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_news(&self, results: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(NEWS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_news_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(NEWS_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the upstreams received on `request_path`
    pub async fn request_count(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

/// A news result shaped like the aggregator's posts
pub fn news_item(title: &str, url: &str) -> Value {
    json!({
        "kind": "news",
        "domain": "example.com",
        "title": title,
        "url": url,
        "published_at": "2024-03-01T12:00:00Z"
    })
}
