//! Per-bot configuration: credentials plus webhook overrides.

use serde::{Deserialize, Serialize};

use super::WebhookParams;

/// Webhook section of a bot: an explicit URL and/or parameter overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotWebhookConfig {
    /// When non-empty, registered verbatim instead of the synthesized route URL.
    pub url: Option<String>,
    pub params: WebhookParams,
}

/// A configured bot. `name` is the key it is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(skip)]
    pub name: String,
    pub token: String,
    #[serde(default)]
    pub webhook: BotWebhookConfig,
}

impl BotConfig {
    /// Bot with no webhook overrides.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            webhook: BotWebhookConfig::default(),
        }
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook.url = Some(url.into());
        self
    }

    pub fn with_params(mut self, params: WebhookParams) -> Self {
        self.webhook.params = params;
        self
    }

    /// Explicit webhook URL, ignoring blank values.
    pub fn explicit_webhook_url(&self) -> Option<&str> {
        self.webhook
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}
