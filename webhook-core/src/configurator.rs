//! Effective webhook parameters and callback URL for a bot.

use url::Url;

use crate::config::{BotConfig, EffectiveWebhookParams, GlobalWebhookConfig, WebhookParams};
use crate::error::{Result, WebhookError};

/// Merges global webhook defaults with bot overrides and computes the URL Telegram should call.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfigurator {
    global: GlobalWebhookConfig,
    app_url: Option<String>,
}

impl WebhookConfigurator {
    pub fn new(global: GlobalWebhookConfig, app_url: Option<String>) -> Self {
        Self { global, app_url }
    }

    pub fn global(&self) -> &GlobalWebhookConfig {
        &self.global
    }

    /// Global params overlaid by the bot's own (bot wins per field).
    pub fn merged_params(&self, bot: &BotConfig) -> WebhookParams {
        self.global
            .params
            .clone()
            .overlay(bot.webhook.params.clone())
    }

    /// Everything `setWebhook` receives. Computed on every call.
    pub fn compute_params(&self, bot: &BotConfig) -> Result<EffectiveWebhookParams> {
        Ok(EffectiveWebhookParams {
            url: self.resolve_url(bot)?,
            params: self.merged_params(bot),
        })
    }

    /// The bot's explicit URL if set, else the receiver route URL forced to https.
    pub fn resolve_url(&self, bot: &BotConfig) -> Result<String> {
        if let Some(url) = bot.explicit_webhook_url() {
            return Ok(url.to_string());
        }
        self.route_url(bot).map(force_https)
    }

    /// `{base}{/path}/{token}/{bot}`; `base` is `app_url`, with its host swapped for `domain` when set.
    fn route_url(&self, bot: &BotConfig) -> Result<String> {
        let app_url = self.app_url.as_deref().filter(|u| !u.trim().is_empty());
        let mut url = match (self.global.domain(), app_url) {
            (Some(domain), base) => {
                let scheme = match base {
                    Some(base) => parse_base(base)?.scheme().to_string(),
                    None => "http".to_string(),
                };
                parse_base(&format!("{}://{}", scheme, domain))?
            }
            (None, Some(base)) => parse_base(base)?,
            (None, None) => return Err(WebhookError::MissingWebhookUrl(bot.name.clone())),
        };

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                WebhookError::Config(format!("cannot append a route path to {}", url_text(app_url)))
            })?;
            segments.pop_if_empty();
            segments.extend(self.global.path_segments());
            segments.push(&bot.token).push(&bot.name);
        }

        Ok(url.into())
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw)
        .map_err(|e| WebhookError::Config(format!("invalid webhook base URL {}: {}", raw, e)))
}

fn url_text(app_url: Option<&str>) -> &str {
    app_url.unwrap_or("the configured domain")
}

/// Rewrites a leading `http:` scheme token to `https:`. Anything else is returned untouched.
pub fn force_https(url: String) -> String {
    match url.strip_prefix("http:") {
        Some(rest) => format!("https:{}", rest),
        None => url,
    }
}
