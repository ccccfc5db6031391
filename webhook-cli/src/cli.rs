//! CLI parser and config loading.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use webhook_core::{Result, TelegramConfig};

#[derive(Parser)]
#[command(name = "tgwebhook")]
#[command(about = "Telegram webhook manager: register, inspect, remove, serve", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config with bots, default bot and global webhook settings.
    #[arg(short, long, env = "TELEGRAM_CONFIG", default_value = "telegram.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Register webhook with Telegram Bot API.
    #[command(name = "webhook:register")]
    WebhookRegister {
        /// The bot name defined in config (default bot when omitted).
        bot: Option<String>,
    },
    /// Show the webhook Telegram currently has for a bot.
    #[command(name = "webhook:info")]
    WebhookInfo {
        /// The bot name defined in config (default bot when omitted).
        bot: Option<String>,
    },
    /// Remove the webhook of a bot.
    #[command(name = "webhook:remove")]
    WebhookRemove {
        /// The bot name defined in config (default bot when omitted).
        bot: Option<String>,
        /// Also drop updates Telegram is still holding for the bot.
        #[arg(long)]
        drop_pending_updates: bool,
    },
    /// List configured bots and their webhook URLs.
    #[command(name = "bots:list")]
    BotsList,
    /// Run the webhook receiver.
    Serve {
        #[arg(short, long, env = "WEBHOOK_LISTEN", default_value = "0.0.0.0:8080")]
        listen: SocketAddr,
    },
}

/// Loads and validates the config file.
pub fn load_config(path: &Path) -> Result<TelegramConfig> {
    let config = TelegramConfig::load(path)?;
    config.validate()?;
    Ok(config)
}
