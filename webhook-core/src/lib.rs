//! # webhook-core
//!
//! Multi-bot webhook management: [`BotRegistry`] resolves named bots, [`WebhookConfigurator`]
//! computes `setWebhook` params and callback URLs, [`WebhookManager`] runs the register / info /
//! remove flows against a [`WebhookClient`]. Transport-agnostic; webhook-telegram provides the
//! teloxide client.

pub mod client;
pub mod config;
pub mod configurator;
pub mod error;
pub mod logger;
pub mod manager;
pub mod registry;

pub use client::{ClientFactory, WebhookClient, WebhookInfo};
pub use config::{
    BotConfig, BotWebhookConfig, EffectiveWebhookParams, GlobalConfig, GlobalWebhookConfig,
    TelegramConfig, WebhookParams,
};
pub use configurator::{force_https, WebhookConfigurator};
pub use error::{Result, WebhookError};
pub use logger::init_tracing;
pub use manager::WebhookManager;
pub use registry::BotRegistry;
