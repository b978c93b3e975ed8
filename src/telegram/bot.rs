//! Bot instance creation and command menu registration

use secrecy::ExposeSecret;
use strum::IntoEnumIterator;
use teloxide::prelude::*;
use teloxide::types::BotCommand;

use crate::core::config::Config;
use crate::router::CommandName;

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = teloxide::net::default_reqwest_settings().build()?;
    let bot = Bot::with_client(config.telegram_bot_token.expose_secret(), client);

    let bot = match config.telegram_api_url {
        Some(ref url) => {
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    };

    Ok(bot)
}

/// Commands shown in the Telegram command menu
pub fn bot_commands() -> Vec<BotCommand> {
    CommandName::iter()
        .map(|name| BotCommand::new(name.as_ref(), name.description()))
        .collect()
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_menu() {
        let commands = bot_commands();
        let names: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();

        assert_eq!(names, vec!["start", "price", "crypto_news"]);
        assert!(commands.iter().all(|c| !c.description.is_empty()));
    }
}
