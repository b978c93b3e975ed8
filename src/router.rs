//! Chat command parsing and dispatch
//!
//! [`CommandRouter::handle`] turns one [`ChatCommand`] into exactly one reply.
//! Upstream failures never escape as errors: they are rendered as the matching
//! "try again" text so the chat always gets an answer.

use std::sync::Arc;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::api::{
    build_http_client, CoinGeckoClient, CryptoPanicClient, NewsItem, NewsSource, PriceQuote, PriceSource,
};
use crate::core::config::Config;

/// Plain text sent back to the chat
pub type ReplyText = String;

/// Fixed reply texts
pub mod replies {
    pub const WELCOME: &str = "Hello! I can provide real-time crypto updates. Use /price <coin> to check prices, or /crypto_news to get the latest crypto news.";
    pub const PRICE_USAGE: &str = "Please provide a cryptocurrency symbol. Example: /price bitcoin";
    pub const PRICE_NOT_FOUND: &str = "Invalid cryptocurrency name. Try again.";
    pub const PRICE_FETCH_ERROR: &str = "Error fetching data. Try again later.";
    pub const NO_NEWS: &str = "No recent news found.";
    pub const NEWS_FETCH_ERROR: &str = "Error fetching news. Try again later.";
}

/// Recognized commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CommandName {
    Start,
    Price,
    CryptoNews,
}

impl CommandName {
    /// Short description shown in the chat client's command menu
    pub fn description(self) -> &'static str {
        match self {
            CommandName::Start => "show what this bot can do",
            CommandName::Price => "current USD price of a coin, e.g. /price bitcoin",
            CommandName::CryptoNews => "latest trending crypto headlines",
        }
    }
}

/// A parsed chat command with its whitespace-separated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCommand {
    pub name: CommandName,
    pub arguments: Vec<String>,
}

impl ChatCommand {
    pub fn new(name: CommandName, arguments: Vec<String>) -> Self {
        Self { name, arguments }
    }

    /// Parses message text such as `/price bitcoin` or `/price@my_bot bitcoin`.
    ///
    /// Returns `None` for plain text, unknown commands, and commands addressed
    /// to a different bot via the `@username` suffix.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;

        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };

        if let (Some(mention), Some(username)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(username) {
                return None;
            }
        }

        let name = name.parse::<CommandName>().ok()?;
        Some(Self::new(name, tokens.map(str::to_string).collect()))
    }
}

/// Routes commands to the price and news sources and formats the replies.
#[derive(Clone)]
pub struct CommandRouter {
    prices: Arc<dyn PriceSource>,
    news: Arc<dyn NewsSource>,
}

impl CommandRouter {
    pub fn new(prices: Arc<dyn PriceSource>, news: Arc<dyn NewsSource>) -> Self {
        Self { prices, news }
    }

    /// Builds a router talking to the APIs configured in `config`.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = build_http_client(config.request_timeout)?;

        let prices = CoinGeckoClient::new(http.clone(), config.price_api_url.clone());
        let news = CryptoPanicClient::new(http, config.news_api_url.clone(), config.crypto_news_api_key.clone());

        Ok(Self::new(Arc::new(prices), Arc::new(news)))
    }

    /// Handles one command and returns the reply for the chat.
    pub async fn handle(&self, command: &ChatCommand) -> ReplyText {
        match command.name {
            CommandName::Start => replies::WELCOME.to_string(),
            CommandName::Price => self.price_reply(&command.arguments).await,
            CommandName::CryptoNews => self.news_reply().await,
        }
    }

    async fn price_reply(&self, arguments: &[String]) -> ReplyText {
        let Some(symbol) = arguments.first() else {
            return replies::PRICE_USAGE.to_string();
        };
        let symbol = symbol.to_lowercase();

        match self.prices.get_price(&symbol).await {
            Ok(PriceQuote {
                usd_price: Some(price), ..
            }) => format_price_line(&symbol, &price),
            Ok(_) => replies::PRICE_NOT_FOUND.to_string(),
            Err(e) => {
                log::warn!("Failed to fetch price for {}: {}", symbol, e);
                replies::PRICE_FETCH_ERROR.to_string()
            }
        }
    }

    async fn news_reply(&self) -> ReplyText {
        match self.news.get_latest_news().await {
            Ok(items) if items.is_empty() => replies::NO_NEWS.to_string(),
            Ok(items) => format_news(&items),
            Err(e) => {
                log::warn!("Failed to fetch news: {}", e);
                replies::NEWS_FETCH_ERROR.to_string()
            }
        }
    }
}

/// `The current price of Bitcoin is $65000`
pub fn format_price_line(symbol: &str, price: &serde_json::Number) -> ReplyText {
    format!("The current price of {} is ${}", capitalize(symbol), price)
}

/// One `title - url` line per item, in the given order.
pub fn format_news(items: &[NewsItem]) -> ReplyText {
    items
        .iter()
        .map(|item| format!("{} - {}", item.title, item.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
