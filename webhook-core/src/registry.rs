//! Named bot lookup with an optional default.

use std::collections::BTreeMap;

use crate::config::{BotConfig, TelegramConfig};
use crate::error::{Result, WebhookError};

/// Immutable set of configured bots, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct BotRegistry {
    bots: BTreeMap<String, BotConfig>,
    default: Option<String>,
}

impl BotRegistry {
    /// Builds a registry from bots and an optional default name. Each bot is keyed by its `name`.
    pub fn new(bots: impl IntoIterator<Item = BotConfig>, default: Option<String>) -> Self {
        Self {
            bots: bots.into_iter().map(|bot| (bot.name.clone(), bot)).collect(),
            default,
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(config.bots.values().cloned(), config.default.clone())
    }

    /// Resolves `name`, or the default bot when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> Result<&BotConfig> {
        let name = match name {
            Some(name) => name,
            None => self.default.as_deref().ok_or(WebhookError::NoDefaultBot)?,
        };
        self.get(name)
            .ok_or_else(|| WebhookError::UnknownBot(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&BotConfig> {
        self.bots.get(name)
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Bot names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(default: Option<&str>) -> BotRegistry {
        BotRegistry::new(
            vec![BotConfig::new("alpha", "T1"), BotConfig::new("beta", "T2")],
            default.map(str::to_string),
        )
    }

    #[test]
    fn test_resolve_by_name() {
        let registry = registry(None);
        let bot = registry.resolve(Some("beta")).unwrap();
        assert_eq!(bot.token, "T2");
    }

    #[test]
    fn test_resolve_default() {
        let registry = registry(Some("alpha"));
        let bot = registry.resolve(None).unwrap();
        assert_eq!(bot.name, "alpha");
    }

    #[test]
    fn test_resolve_unknown_bot() {
        let registry = registry(Some("alpha"));
        let err = registry.resolve(Some("gamma")).unwrap_err();
        assert!(matches!(err, WebhookError::UnknownBot(ref name) if name == "gamma"));
    }

    #[test]
    fn test_resolve_no_default() {
        let registry = registry(None);
        assert!(matches!(
            registry.resolve(None),
            Err(WebhookError::NoDefaultBot)
        ));
    }

    #[test]
    fn test_dangling_default_is_unknown_bot() {
        let registry = registry(Some("gamma"));
        assert!(matches!(
            registry.resolve(None),
            Err(WebhookError::UnknownBot(_))
        ));
    }

    #[test]
    fn test_names_sorted() {
        let registry = BotRegistry::new(
            vec![BotConfig::new("zeta", "T"), BotConfig::new("alpha", "T")],
            None,
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
    }
}
