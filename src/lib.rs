//! coinbot - Telegram bot for crypto prices and headlines
//!
//! Relays `/price <coin>` and `/crypto_news` from Telegram to a price-index
//! API and a news-aggregator API and answers with plain text.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, metrics and the liveness server
//! - `api`: clients for the price and news APIs
//! - `router`: command parsing, dispatch and reply formatting
//! - `telegram`: bot setup, handler tree and polling/webhook delivery
//! - `cli`: command-line interface

pub mod api;
pub mod cli;
pub mod core;
pub mod router;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, Config, ConfigError};
pub use router::{ChatCommand, CommandName, CommandRouter, ReplyText};
pub use telegram::{schema, DeliveryMode, HandlerDeps};
