//! Builds one [`TelegramWebhookClient`] per resolved bot.

use webhook_core::{BotConfig, ClientFactory, Result, TelegramConfig, WebhookClient};

use crate::client::TelegramWebhookClient;

/// Creates teloxide clients, optionally against a custom Bot API server.
#[derive(Debug, Clone, Default)]
pub struct TelegramClientFactory {
    api_url: Option<String>,
}

impl TelegramClientFactory {
    pub fn new(api_url: Option<String>) -> Self {
        Self { api_url }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(config.telegram_api_url.clone())
    }
}

impl ClientFactory for TelegramClientFactory {
    fn client_for(&self, bot: &BotConfig) -> Result<Box<dyn WebhookClient>> {
        let client = match self.api_url.as_deref() {
            Some(api_url) => TelegramWebhookClient::with_api_url(bot.token.clone(), api_url)?,
            None => TelegramWebhookClient::new(bot.token.clone()),
        };
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_for_default_api() {
        let factory = TelegramClientFactory::default();
        assert!(factory.client_for(&BotConfig::new("alpha", "T1")).is_ok());
    }

    #[test]
    fn test_client_for_invalid_api_url() {
        let factory = TelegramClientFactory::new(Some("::".to_string()));
        assert!(factory.client_for(&BotConfig::new("alpha", "T1")).is_err());
    }
}
