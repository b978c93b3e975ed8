//! Logging initialization and startup diagnostics

use anyhow::Result;

use crate::core::config::Config;

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize the console logger
///
/// Honors `RUST_LOG` when present, otherwise logs at `info`.
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - A global logger was already installed
pub fn init_logger() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup.
///
/// Secrets are never printed; only whether they are present.
pub fn log_startup_configuration(config: &Config, use_webhook: bool) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("  TELEGRAM_BOT_TOKEN:  set");
    log::info!("  CRYPTO_NEWS_API_KEY: set");
    log::info!("  Listener port:       {}", config.port);
    log::info!("  Price API:           {}", config.price_api_url);
    log::info!("  News API:            {}", config.news_api_url);
    log::info!("  Request timeout:     {}s", config.request_timeout.as_secs());

    if let Some(ref url) = config.telegram_api_url {
        log::info!("  Bot API server:      {}", url);
    }

    if use_webhook {
        match config.webhook_url {
            Some(ref url) => log::info!("  Delivery:            webhook ({})", url),
            None => log::error!("  Delivery:            webhook requested but WEBHOOK_URL is not set"),
        }
    } else {
        log::info!("  Delivery:            long polling");
        if config.webhook_url.is_some() {
            log::warn!("  WEBHOOK_URL is set but ignored; pass --webhook to use it");
        }
    }
}
