//! Typed `setWebhook` options shared by the global defaults and per-bot overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Optional `setWebhook` parameters. `url` is deliberately absent: it is always computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookParams {
    /// Public key certificate uploaded with the webhook (self-signed setups).
    pub certificate: Option<PathBuf>,
    pub ip_address: Option<String>,
    /// 1-100; Telegram defaults to 40.
    pub max_connections: Option<u8>,
    /// Update kinds in snake_case (`message`, `callback_query`, ...).
    pub allowed_updates: Option<Vec<String>>,
    pub drop_pending_updates: Option<bool>,
    /// Echoed back by Telegram in `X-Telegram-Bot-Api-Secret-Token`.
    pub secret_token: Option<String>,
}

impl WebhookParams {
    /// Field-wise merge: every value set in `overrides` wins over `self`.
    pub fn overlay(self, overrides: WebhookParams) -> WebhookParams {
        WebhookParams {
            certificate: overrides.certificate.or(self.certificate),
            ip_address: overrides.ip_address.or(self.ip_address),
            max_connections: overrides.max_connections.or(self.max_connections),
            allowed_updates: overrides.allowed_updates.or(self.allowed_updates),
            drop_pending_updates: overrides.drop_pending_updates.or(self.drop_pending_updates),
            secret_token: overrides.secret_token.or(self.secret_token),
        }
    }
}

/// Parameters actually sent to `setWebhook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveWebhookParams {
    pub url: String,
    pub params: WebhookParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_override_wins() {
        let global = WebhookParams {
            max_connections: Some(40),
            ip_address: Some("10.0.0.1".to_string()),
            ..Default::default()
        };
        let bot = WebhookParams {
            max_connections: Some(10),
            ..Default::default()
        };

        let merged = global.overlay(bot);

        assert_eq!(merged.max_connections, Some(10));
        assert_eq!(merged.ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_overlay_keeps_base_when_override_empty() {
        let global = WebhookParams {
            allowed_updates: Some(vec!["message".to_string()]),
            drop_pending_updates: Some(true),
            ..Default::default()
        };

        let merged = global.clone().overlay(WebhookParams::default());

        assert_eq!(merged, global);
    }
}
