//! # webhook-telegram
//!
//! Telegram transport for webhook-core: [`TelegramWebhookClient`] implements
//! [`webhook_core::WebhookClient`] on top of teloxide, [`TelegramClientFactory`] builds one per bot.

mod client;
mod factory;

pub use client::{parse_allowed_updates, TelegramWebhookClient};
pub use factory::TelegramClientFactory;
