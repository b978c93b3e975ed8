//! Process configuration
//!
//! Everything the bot needs from the environment is read once at startup into
//! an immutable [`Config`] and handed to the router, the API clients and the
//! delivery adapter when they are built.

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use super::error::{ConfigError, ConfigResult};

/// Default base URL of the price-index API
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default base URL of the news-aggregator API
pub const DEFAULT_NEWS_API_URL: &str = "https://cryptopanic.com/api/v1";

/// Default port for the liveness/webhook listener
pub const DEFAULT_PORT: u16 = 5000;

/// Default timeout for upstream API requests (in seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable names
pub mod keys {
    pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
    pub const CRYPTO_NEWS_API_KEY: &str = "CRYPTO_NEWS_API_KEY";
    pub const PORT: &str = "PORT";
    pub const WEBHOOK_URL: &str = "WEBHOOK_URL";
    pub const PRICE_API_URL: &str = "PRICE_API_URL";
    pub const NEWS_API_URL: &str = "NEWS_API_URL";
    pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
}

/// Immutable bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token
    pub telegram_bot_token: SecretString,
    /// CryptoPanic auth token, sent in the news request query string
    pub crypto_news_api_key: SecretString,
    /// Port for the liveness (and, in webhook mode, webhook) listener
    pub port: u16,
    /// Public URL Telegram pushes updates to; only used in webhook mode
    pub webhook_url: Option<Url>,
    /// Base URL of the price-index API
    pub price_api_url: Url,
    /// Base URL of the news-aggregator API
    pub news_api_url: Url,
    /// Custom Bot API server, e.g. a local telegram-bot-api instance
    pub telegram_api_url: Option<Url>,
    /// Timeout applied to every upstream API request
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if `TELEGRAM_BOT_TOKEN` or
    /// `CRYPTO_NEWS_API_KEY` is unset or empty, and [`ConfigError::Invalid`]
    /// if any optional variable cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telegram_bot_token = get(keys::TELEGRAM_BOT_TOKEN).ok_or(ConfigError::Missing(keys::TELEGRAM_BOT_TOKEN))?;
        let crypto_news_api_key =
            get(keys::CRYPTO_NEWS_API_KEY).ok_or(ConfigError::Missing(keys::CRYPTO_NEWS_API_KEY))?;

        let port = match get(keys::PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: keys::PORT,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let webhook_url = get(keys::WEBHOOK_URL)
            .map(|raw| parse_url(keys::WEBHOOK_URL, &raw))
            .transpose()?;

        let price_api_url = parse_url(
            keys::PRICE_API_URL,
            &get(keys::PRICE_API_URL).unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string()),
        )?;
        let news_api_url = parse_url(
            keys::NEWS_API_URL,
            &get(keys::NEWS_API_URL).unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string()),
        )?;
        let telegram_api_url = get(keys::TELEGRAM_API_URL)
            .map(|raw| parse_url(keys::TELEGRAM_API_URL, &raw))
            .transpose()?;

        let request_timeout = match get(keys::HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: keys::HTTP_TIMEOUT_SECS,
                        reason: "timeout must be greater than zero".to_string(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: keys::HTTP_TIMEOUT_SECS,
                        reason: e.to_string(),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            telegram_bot_token: SecretString::from(telegram_bot_token),
            crypto_news_api_key: SecretString::from(crypto_news_api_key),
            port,
            webhook_url,
            price_api_url,
            news_api_url,
            telegram_api_url,
            request_timeout,
        })
    }

    /// Returns the webhook URL, validated for use by the webhook listener.
    ///
    /// The liveness route owns `/`, so the webhook must live on a sub-path.
    pub fn require_webhook_url(&self) -> ConfigResult<Url> {
        let url = self
            .webhook_url
            .clone()
            .ok_or(ConfigError::Missing(keys::WEBHOOK_URL))?;

        if url.path() == "/" {
            return Err(ConfigError::Invalid {
                key: keys::WEBHOOK_URL,
                reason: "webhook path must not be '/', it is reserved for the liveness route".to_string(),
            });
        }

        Ok(url)
    }
}

fn parse_url(key: &'static str, raw: &str) -> ConfigResult<Url> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
