//! Mock Telegram Bot API
//!
//! Messages are built from JSON, which is more reliable than constructing
//! teloxide's structs by hand.

use serde_json::json;
use teloxide::prelude::*;
use teloxide::types::Update;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CHAT_ID: i64 = 123456789;
pub const TEST_BOT_USERNAME: &str = "coin_test_bot";

/// Mock Telegram API server plus a bot pointed at it
pub struct TelegramMock {
    pub server: MockServer,
    pub bot: Bot,
}

impl TelegramMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let bot = Bot::new("123456:TEST").set_api_url(server.uri().parse().expect("mock uri is a valid url"));
        Self { server, bot }
    }

    /// Mock a successful sendMessage API call
    pub async fn mock_send_message(&self) {
        let response = json!({
            "ok": true,
            "result": {
                "message_id": 42,
                "from": {
                    "id": 987654321,
                    "is_bot": true,
                    "first_name": "CoinBot",
                    "username": TEST_BOT_USERNAME
                },
                "chat": {
                    "id": TEST_CHAT_ID,
                    "first_name": "Test",
                    "username": "testuser",
                    "type": "private"
                },
                "date": 1735992000,
                "text": "reply"
            }
        });

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendmessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Mock a failing sendMessage API call
    pub async fn mock_send_message_failure(&self) {
        let response = json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        });

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendmessage"))
            .respond_with(ResponseTemplate::new(403).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all sendMessage requests, in order
    pub async fn sent_messages(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().to_lowercase().ends_with("/sendmessage"))
            .map(|r| serde_json::from_slice(&r.body).expect("sendMessage body should be JSON"))
            .collect()
    }
}

/// Builds a private-chat message update carrying `text`
pub fn message_update(text: &str) -> Update {
    let json = json!({
        "update_id": 1,
        "message": {
            "message_id": 1,
            "date": 1735992000,
            "chat": {
                "id": TEST_CHAT_ID,
                "type": "private",
                "first_name": "Test",
                "username": "testuser"
            },
            "from": {
                "id": TEST_CHAT_ID,
                "is_bot": false,
                "first_name": "Test",
                "username": "testuser",
                "language_code": "en"
            },
            "text": text
        }
    });

    // Parse from text like the dispatcher does; `from_value` yields `UpdateKind::Error`
    serde_json::from_str(&json.to_string()).expect("Failed to deserialize update")
}
