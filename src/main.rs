use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;

use coinbot::cli::{query_text, Cli, Commands};
use coinbot::core::{init_logger, log_startup_configuration, web_server, Config, Metrics};
use coinbot::router::{ChatCommand, CommandRouter};
use coinbot::telegram::{create_bot, delivery, schema, setup_bot_commands, DeliveryMode, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if configuration is incomplete or initialization fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger()?;

    let config = Config::from_env().inspect_err(|e| log::error!("Refusing to start: {}", e))?;

    match cli.command {
        Some(Commands::Run { webhook }) => run_bot(config, webhook).await,
        Some(Commands::Query { text }) => run_query(config, &query_text(&text)).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(config, false).await
        }
    }
}

/// Run the Telegram bot
async fn run_bot(config: Config, use_webhook: bool) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");
    log_startup_configuration(&config, use_webhook);

    let mode = if use_webhook {
        DeliveryMode::Webhook(config.require_webhook_url()?)
    } else {
        DeliveryMode::Polling
    };

    let metrics = Arc::new(Metrics::new()?);
    let router = CommandRouter::from_config(&config)?;
    let bot = create_bot(&config)?;

    let me = bot.get_me().await?;
    let bot_username = me.user.username.clone();
    log::info!("Authorized as @{}", bot_username.as_deref().unwrap_or("<unknown>"));

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(router, Arc::clone(&metrics), bot_username);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    log::info!(
        "Bot initialization complete in {:.2}s",
        bot_init_start.elapsed().as_secs_f64()
    );

    delivery::run(bot, schema(deps), mode, addr, web_server::router(metrics)).await
}

/// Run one command through the router without Telegram
async fn run_query(config: Config, text: &str) -> Result<()> {
    let Some(command) = ChatCommand::parse(text, None) else {
        anyhow::bail!(
            "Not a recognized command: {} (expected /start, /price <coin> or /crypto_news)",
            text
        );
    };

    let router = CommandRouter::from_config(&config)?;
    println!("{}", router.handle(&command).await);
    Ok(())
}
