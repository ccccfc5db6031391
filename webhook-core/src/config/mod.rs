//! Configuration: per-bot settings, global webhook defaults, and the file that holds them.

mod bot;
mod global;
mod params;
mod telegram;


pub use bot::{BotConfig, BotWebhookConfig};
pub use global::{GlobalConfig, GlobalWebhookConfig};
pub use params::{EffectiveWebhookParams, WebhookParams};
pub use telegram::TelegramConfig;
