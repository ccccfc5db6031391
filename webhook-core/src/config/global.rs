//! Webhook defaults shared by all bots.

use serde::{Deserialize, Serialize};

use super::WebhookParams;

/// Global webhook section. `domain` and `path` shape the receiver route and are never sent to Telegram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalWebhookConfig {
    /// Host the receiver route is bound to (e.g. `bots.example.com`, optionally with `:port`).
    pub domain: Option<String>,
    /// Path prefix of the receiver route (e.g. `/telegram`).
    pub path: Option<String>,
    /// Default `setWebhook` parameters.
    pub params: WebhookParams,
}

impl GlobalWebhookConfig {
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Non-empty path segments of the route prefix.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path
            .as_deref()
            .unwrap_or("")
            .split('/')
            .filter(|segment| !segment.is_empty())
    }

    /// Route prefix normalized to `/a/b`, or empty when unset.
    pub fn route_prefix(&self) -> String {
        self.path_segments()
            .map(|segment| format!("/{}", segment))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    pub webhook: GlobalWebhookConfig,
}
