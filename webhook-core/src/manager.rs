//! Webhook flows: register, inspect, remove. One API call per invocation, no retries.

use tracing::{debug, info, instrument};

use crate::client::{ClientFactory, WebhookInfo};
use crate::config::{BotConfig, EffectiveWebhookParams, TelegramConfig};
use crate::configurator::WebhookConfigurator;
use crate::error::{Result, WebhookError};
use crate::registry::BotRegistry;

/// Ties the registry and configurator to a client factory.
pub struct WebhookManager<F> {
    registry: BotRegistry,
    configurator: WebhookConfigurator,
    factory: F,
}

impl<F: ClientFactory> WebhookManager<F> {
    pub fn new(registry: BotRegistry, configurator: WebhookConfigurator, factory: F) -> Self {
        Self {
            registry,
            configurator,
            factory,
        }
    }

    pub fn from_config(config: &TelegramConfig, factory: F) -> Self {
        Self::new(
            BotRegistry::from_config(config),
            WebhookConfigurator::new(config.global.webhook.clone(), config.app_url.clone()),
            factory,
        )
    }

    pub fn registry(&self) -> &BotRegistry {
        &self.registry
    }

    pub fn configurator(&self) -> &WebhookConfigurator {
        &self.configurator
    }

    /// Resolves `name` (or the default bot) and registers its webhook.
    pub async fn register(&self, name: Option<&str>) -> Result<EffectiveWebhookParams> {
        let bot = self.registry.resolve(name)?;
        self.register_bot(bot).await
    }

    /// Computes fresh params for `bot` and calls `setWebhook` once.
    #[instrument(skip(self, bot), fields(bot = %bot.name))]
    pub async fn register_bot(&self, bot: &BotConfig) -> Result<EffectiveWebhookParams> {
        let params = self.configurator.compute_params(bot)?;
        debug!(url = %params.url, params = ?params.params, "Computed webhook params");

        let client = self.factory.client_for(bot)?;
        if client.register_webhook(&params).await? {
            info!("Webhook registered");
            Ok(params)
        } else {
            debug!("Bot API did not accept the webhook");
            Err(WebhookError::RegistrationFailed(format!(
                "Bot API did not accept the webhook for [{}]",
                bot.name
            )))
        }
    }

    /// `getWebhookInfo` for `name` (or the default bot).
    #[instrument(skip(self))]
    pub async fn info(&self, name: Option<&str>) -> Result<(&BotConfig, WebhookInfo)> {
        let bot = self.registry.resolve(name)?;
        let client = self.factory.client_for(bot)?;
        let info = client.webhook_info().await?;
        debug!(bot = %bot.name, pending = info.pending_update_count, "Fetched webhook info");
        Ok((bot, info))
    }

    /// `deleteWebhook` for `name` (or the default bot).
    #[instrument(skip(self))]
    pub async fn remove(&self, name: Option<&str>, drop_pending_updates: bool) -> Result<&BotConfig> {
        let bot = self.registry.resolve(name)?;
        let client = self.factory.client_for(bot)?;
        if client.delete_webhook(drop_pending_updates).await? {
            info!(bot = %bot.name, "Webhook removed");
            Ok(bot)
        } else {
            debug!(bot = %bot.name, "Bot API did not remove the webhook");
            Err(WebhookError::RegistrationFailed(format!(
                "Bot API did not remove the webhook for [{}]",
                bot.name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::client::{MockWebhookClient, WebhookClient};
    use crate::config::{GlobalWebhookConfig, WebhookParams};

    fn factory(
        mock: MockWebhookClient,
        calls: Arc<AtomicUsize>,
    ) -> impl ClientFactory {
        let slot = Mutex::new(Some(mock));
        move |_bot: &BotConfig| -> Result<Box<dyn WebhookClient>> {
            calls.fetch_add(1, Ordering::SeqCst);
            let mock = slot.lock().unwrap().take().expect("client built once per flow");
            Ok(Box::new(mock))
        }
    }

    fn manager(mock: MockWebhookClient, calls: Arc<AtomicUsize>) -> WebhookManager<impl ClientFactory> {
        let bot = BotConfig::new("alpha", "T1").with_params(WebhookParams {
            max_connections: Some(10),
            ..Default::default()
        });
        let global = GlobalWebhookConfig {
            path: Some("/hooks".to_string()),
            params: WebhookParams {
                max_connections: Some(40),
                ..Default::default()
            },
            ..Default::default()
        };
        WebhookManager::new(
            BotRegistry::new(vec![bot], Some("alpha".to_string())),
            WebhookConfigurator::new(global, Some("http://localhost".to_string())),
            factory(mock, calls),
        )
    }

    #[tokio::test]
    async fn test_register_sends_effective_params() {
        let mut mock = MockWebhookClient::new();
        mock.expect_register_webhook()
            .times(1)
            .withf(|p| {
                p.url == "https://localhost/hooks/T1/alpha" && p.params.max_connections == Some(10)
            })
            .returning(|_| Ok(true));
        let calls = Arc::new(AtomicUsize::new(0));
        let manager = manager(mock, calls.clone());

        let params = manager.register(None).await.unwrap();

        assert_eq!(params.url, "https://localhost/hooks/T1/alpha");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_register_rejected_is_registration_failed() {
        let mut mock = MockWebhookClient::new();
        mock.expect_register_webhook()
            .times(1)
            .returning(|_| Ok(false));
        let manager = manager(mock, Arc::new(AtomicUsize::new(0)));

        let err = manager.register(Some("alpha")).await.unwrap_err();

        assert!(matches!(err, WebhookError::RegistrationFailed(_)));
    }

    #[tokio::test]
    async fn test_register_network_error_not_retried() {
        let mut mock = MockWebhookClient::new();
        mock.expect_register_webhook()
            .times(1)
            .returning(|_| Err(WebhookError::Network("connection reset".to_string())));
        let manager = manager(mock, Arc::new(AtomicUsize::new(0)));

        let err = manager.register(None).await.unwrap_err();

        assert!(matches!(err, WebhookError::Network(_)));
    }

    #[tokio::test]
    async fn test_unknown_bot_builds_no_client() {
        let mock = MockWebhookClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let manager = manager(mock, calls.clone());

        let err = manager.register(Some("gamma")).await.unwrap_err();

        assert!(matches!(err, WebhookError::UnknownBot(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_info_returns_client_info() {
        let mut mock = MockWebhookClient::new();
        mock.expect_webhook_info().times(1).returning(|| {
            Ok(WebhookInfo {
                url: Some("https://localhost/hooks/T1/alpha".to_string()),
                pending_update_count: 3,
                ..Default::default()
            })
        });
        let manager = manager(mock, Arc::new(AtomicUsize::new(0)));

        let (bot, info) = manager.info(None).await.unwrap();

        assert_eq!(bot.name, "alpha");
        assert_eq!(info.pending_update_count, 3);
    }

    #[tokio::test]
    async fn test_remove_passes_drop_pending() {
        let mut mock = MockWebhookClient::new();
        mock.expect_delete_webhook()
            .times(1)
            .withf(|drop| *drop)
            .returning(|_| Ok(true));
        let manager = manager(mock, Arc::new(AtomicUsize::new(0)));

        let bot = manager.remove(Some("alpha"), true).await.unwrap();

        assert_eq!(bot.name, "alpha");
    }
}
