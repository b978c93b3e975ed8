//! Handler types and dependencies

use std::sync::Arc;

use crate::core::metrics::Metrics;
use crate::router::CommandRouter;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub router: CommandRouter,
    pub metrics: Arc<Metrics>,
    /// Bot username (without @), used to skip commands addressed to other bots
    pub bot_username: Option<String>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(router: CommandRouter, metrics: Arc<Metrics>, bot_username: Option<String>) -> Self {
        Self {
            router,
            metrics,
            bot_username,
        }
    }
}
