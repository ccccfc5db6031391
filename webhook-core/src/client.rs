//! Bot API capability used by the webhook flows. Transport-agnostic; see webhook-telegram for teloxide.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{BotConfig, EffectiveWebhookParams};
use crate::error::Result;

/// Current webhook status as reported by `getWebhookInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// `None` when no webhook is set (the bot is in getUpdates mode).
    pub url: Option<String>,
    pub has_custom_certificate: bool,
    pub pending_update_count: u32,
    pub ip_address: Option<String>,
    /// Unix time of the most recent delivery error.
    pub last_error_date: Option<i64>,
    pub last_error_message: Option<String>,
    pub max_connections: Option<u8>,
    pub allowed_updates: Option<Vec<String>>,
}

/// Webhook operations of a single bot's API client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// `setWebhook`. `Ok(false)` means the API refused without a transport error.
    async fn register_webhook(&self, params: &EffectiveWebhookParams) -> Result<bool>;
    /// `getWebhookInfo`.
    async fn webhook_info(&self) -> Result<WebhookInfo>;
    /// `deleteWebhook`.
    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool>;
}

/// Builds the client for a resolved bot. Only called after the bot and its params resolved.
pub trait ClientFactory: Send + Sync {
    fn client_for(&self, bot: &BotConfig) -> Result<Box<dyn WebhookClient>>;
}

impl<F> ClientFactory for F
where
    F: Fn(&BotConfig) -> Result<Box<dyn WebhookClient>> + Send + Sync,
{
    fn client_for(&self, bot: &BotConfig) -> Result<Box<dyn WebhookClient>> {
        self(bot)
    }
}
