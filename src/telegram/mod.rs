//! Telegram integration: bot setup, handler tree and update delivery

pub mod bot;
pub mod delivery;
pub mod handlers;

// Re-exports for convenience
pub use bot::{bot_commands, create_bot, setup_bot_commands};
pub use delivery::DeliveryMode;
pub use handlers::{schema, HandlerDeps, HandlerError};
