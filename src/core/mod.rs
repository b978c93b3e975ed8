//! Core utilities: configuration, errors, logging, metrics and the liveness server

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod web_server;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use logging::{init_logger, log_startup_configuration};
pub use metrics::Metrics;
