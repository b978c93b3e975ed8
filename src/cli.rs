use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coinbot")]
#[command(author, version, about = "Telegram bot for crypto prices and headlines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot
    Run {
        /// Use webhook mode (requires WEBHOOK_URL) instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Run a single chat command locally and print the reply
    ///
    /// Example: coinbot query /price bitcoin
    Query {
        /// Command text, with or without the leading slash
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Joins `query` words back into chat text, adding the leading slash if omitted.
pub fn query_text(words: &[String]) -> String {
    let text = words.join(" ");
    if text.starts_with('/') {
        text
    } else {
        format!("/{}", text)
    }
}
