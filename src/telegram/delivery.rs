//! Update delivery: long polling or webhook
//!
//! Both modes feed the same handler tree and both keep the liveness routes
//! reachable on the configured port. In webhook mode the Telegram webhook
//! route shares that listener.

use std::future::Future;
use std::net::SocketAddr;

use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::update_listeners::Polling;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use super::handlers::HandlerError;
use crate::core::web_server;

/// How updates reach the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Long polling `getUpdates`
    Polling,
    /// Telegram pushes updates to this public URL
    Webhook(Url),
}

/// Runs the dispatcher until Ctrl-C, serving `liveness` on `addr` alongside.
///
/// # Errors
/// Fails if `addr` cannot be bound or, in webhook mode, if the webhook cannot
/// be registered with Telegram.
pub async fn run(
    bot: Bot,
    handler: UpdateHandler<HandlerError>,
    mode: DeliveryMode,
    addr: SocketAddr,
    liveness: axum::Router,
) -> anyhow::Result<()> {
    match mode {
        DeliveryMode::Polling => run_polling(bot, handler, addr, liveness).await,
        DeliveryMode::Webhook(url) => run_webhook(bot, handler, url, addr, liveness).await,
    }
}

async fn run_polling(
    bot: Bot,
    handler: UpdateHandler<HandlerError>,
    addr: SocketAddr,
    liveness: axum::Router,
) -> anyhow::Result<()> {
    // getUpdates is rejected while a webhook is registered
    if let Err(e) = bot.delete_webhook().await {
        log::warn!("Failed to delete webhook before polling: {}", e);
    }

    let tcp = TcpListener::bind(addr).await?;
    log::info!("Liveness server listening on http://{}", addr);
    let server = tokio::spawn(web_server::serve(tcp, liveness));

    log::info!("Starting bot in long polling mode");
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    let mut dispatcher = build_dispatcher(bot, handler);
    let dispatch = dispatcher.dispatch_with_listener(
        listener,
        LoggingErrorHandler::with_custom_text("An error from the update listener"),
    );

    run_alongside(dispatch, server).await
}

/// Drives `dispatch` while `server` runs, aborting the server once dispatch ends.
///
/// # Errors
/// The liveness server exiting first, with or without an error, stops the bot.
async fn run_alongside<F>(dispatch: F, mut server: JoinHandle<anyhow::Result<()>>) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let finished = tokio::select! {
        () = dispatch => None,
        finished = &mut server => Some(finished),
    };

    let Some(finished) = finished else {
        log::info!("Dispatcher shutdown gracefully");
        server.abort();
        return Ok(());
    };

    let error = match finished {
        Ok(Ok(())) => anyhow::anyhow!("Liveness server stopped unexpectedly"),
        Ok(Err(e)) => e.context("Liveness server failed"),
        Err(e) => anyhow::Error::new(e).context("Liveness server task panicked"),
    };
    log::error!("{:#}", error);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_liveness_failure_stops_dispatch() {
        let server = tokio::spawn(async { Err(anyhow::anyhow!("address in use")) });

        let err = run_alongside(std::future::pending::<()>(), server).await.unwrap_err();

        assert!(format!("{:#}", err).contains("address in use"));
    }

    #[tokio::test]
    async fn test_liveness_exit_without_error_is_reported() {
        let server = tokio::spawn(async { Ok(()) });

        let err = run_alongside(std::future::pending::<()>(), server).await.unwrap_err();

        assert!(err.to_string().contains("stopped unexpectedly"));
    }

    #[tokio::test]
    async fn test_dispatch_end_aborts_liveness_server() {
        let server = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        });

        let result = tokio::time::timeout(Duration::from_secs(5), run_alongside(async {}, server)).await;

        assert!(matches!(result, Ok(Ok(()))));
    }
}
