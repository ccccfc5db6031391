//! Top-level config file: default bot, bots, global webhook defaults. Loaded once at startup.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{BotConfig, GlobalConfig};
use crate::error::{Result, WebhookError};

/// Whole configuration surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot used when a command is given no bot name.
    pub default: Option<String>,
    /// Public base URL of this application; receiver route URLs are built from it.
    pub app_url: Option<String>,
    /// Custom Bot API server; defaults to api.telegram.org.
    pub telegram_api_url: Option<String>,
    pub bots: BTreeMap<String, BotConfig>,
    pub global: GlobalConfig,
}

impl TelegramConfig {
    /// Reads the TOML file at `path`, then applies env overrides:
    /// `APP_URL`, `TELEGRAM_API_URL` (or `TELOXIDE_API_URL`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            WebhookError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&raw)?;

        if let Ok(app_url) = env::var("APP_URL") {
            config.app_url = Some(app_url);
        }
        if let Ok(api_url) = env::var("TELEGRAM_API_URL").or_else(|_| env::var("TELOXIDE_API_URL"))
        {
            config.telegram_api_url = Some(api_url);
        }

        debug!(
            path = %path.display(),
            bots = config.bots.len(),
            default = ?config.default,
            "Loaded telegram config"
        );
        Ok(config)
    }

    /// Parses config text; each bot's `name` is filled from its table key.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        for (name, bot) in config.bots.iter_mut() {
            bot.name = name.clone();
        }
        Ok(config)
    }

    /// Fails fast on config that would only break later: empty tokens, a dangling default,
    /// unparsable URLs.
    pub fn validate(&self) -> Result<()> {
        for bot in self.bots.values() {
            if bot.token.trim().is_empty() {
                return Err(WebhookError::Config(format!(
                    "bot [{}] has an empty token",
                    bot.name
                )));
            }
        }
        if let Some(ref default) = self.default {
            if !self.bots.contains_key(default) {
                return Err(WebhookError::Config(format!(
                    "default bot [{}] is not defined under [bots]",
                    default
                )));
            }
        }
        if let Some(ref app_url) = self.app_url {
            Url::parse(app_url).map_err(|e| {
                WebhookError::Config(format!("app_url is not a valid URL: {} ({})", app_url, e))
            })?;
        }
        if let Some(ref api_url) = self.telegram_api_url {
            Url::parse(api_url).map_err(|e| {
                WebhookError::Config(format!(
                    "telegram_api_url is not a valid URL: {} ({})",
                    api_url, e
                ))
            })?;
        }
        Ok(())
    }
}
