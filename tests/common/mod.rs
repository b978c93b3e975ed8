//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

pub mod telegram;
pub mod upstream;

#[allow(unused_imports)]
pub use telegram::{message_update, TelegramMock, TEST_BOT_USERNAME, TEST_CHAT_ID};
#[allow(unused_imports)]
pub use upstream::{news_item, Upstream};
