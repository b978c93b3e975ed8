//! Dispatcher schema

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::router::ChatCommand;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Text messages that parse as a [`ChatCommand`] are routed and answered in
/// the same chat; everything else falls through to the dispatcher's default
/// handler. The same schema is used by both delivery modes and by the
/// integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let bot_username = deps.bot_username.clone();

    Update::filter_message()
        .filter_map(move |msg: Message| {
            msg.text()
                .and_then(|text| ChatCommand::parse(text, bot_username.as_deref()))
        })
        .endpoint(move |bot: Bot, msg: Message, command: ChatCommand| {
            let deps = deps.clone();
            async move { handle_command(&bot, &msg, &command, &deps).await }
        })
}

/// Routes one command and sends the reply to the originating chat.
///
/// A failed send is logged and counted but not propagated: there is no
/// second channel to report it on.
async fn handle_command(
    bot: &Bot,
    msg: &Message,
    command: &ChatCommand,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let label = command.name.as_ref();
    log::info!("Received /{} from chat {}", label, msg.chat.id);

    deps.metrics.commands_total.with_label_values(&[label]).inc();
    let timer = deps
        .metrics
        .command_duration_seconds
        .with_label_values(&[label])
        .start_timer();

    let reply = deps.router.handle(command).await;
    let sent = bot.send_message(msg.chat.id, reply).await;
    timer.observe_duration();

    if let Err(e) = sent {
        log::error!("Failed to send /{} reply to chat {}: {}", label, msg.chat.id, e);
        deps.metrics.reply_failures_total.with_label_values(&[label]).inc();
    }

    Ok(())
}
