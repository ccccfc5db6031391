//! Wraps teloxide::Bot and implements [`webhook_core::WebhookClient`].

use async_trait::async_trait;
use serde_json::Value;
use teloxide::payloads::{DeleteWebhookSetters, SetWebhookSetters};
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, InputFile};
use teloxide::RequestError;
use tracing::{debug, instrument};
use webhook_core::{EffectiveWebhookParams, Result, WebhookClient, WebhookError, WebhookInfo};

/// Thin wrapper around teloxide::Bot for one bot token.
pub struct TelegramWebhookClient {
    bot: teloxide::Bot,
}

impl TelegramWebhookClient {
    /// Client talking to api.telegram.org.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }

    /// Client talking to a custom Bot API server.
    pub fn with_api_url(token: impl Into<String>, api_url: &str) -> Result<Self> {
        let url = parse_url(api_url)?;
        Ok(Self {
            bot: teloxide::Bot::new(token).set_api_url(url),
        })
    }
}

#[async_trait]
impl WebhookClient for TelegramWebhookClient {
    #[instrument(skip(self, params))]
    async fn register_webhook(&self, params: &EffectiveWebhookParams) -> Result<bool> {
        let url = parse_url(&params.url)?;
        let options = &params.params;

        let mut request = self.bot.set_webhook(url);
        if let Some(ref certificate) = options.certificate {
            request = request.certificate(InputFile::file(certificate.clone()));
        }
        if let Some(ref ip_address) = options.ip_address {
            request = request.ip_address(ip_address.clone());
        }
        if let Some(max_connections) = options.max_connections {
            request = request.max_connections(max_connections);
        }
        if let Some(ref kinds) = options.allowed_updates {
            request = request.allowed_updates(parse_allowed_updates(kinds)?);
        }
        if let Some(drop_pending_updates) = options.drop_pending_updates {
            request = request.drop_pending_updates(drop_pending_updates);
        }
        if let Some(ref secret_token) = options.secret_token {
            request = request.secret_token(secret_token.clone());
        }

        request.await.map_err(map_request_error)?;
        debug!("setWebhook accepted");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn webhook_info(&self) -> Result<WebhookInfo> {
        let info = self
            .bot
            .get_webhook_info()
            .await
            .map_err(map_request_error)?;
        Ok(webhook_info_from(info))
    }

    #[instrument(skip(self))]
    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool> {
        self.bot
            .delete_webhook()
            .drop_pending_updates(drop_pending_updates)
            .await
            .map_err(map_request_error)?;
        Ok(true)
    }
}

fn parse_url(raw: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(raw).map_err(|e| WebhookError::Config(format!("Invalid URL {}: {}", raw, e)))
}

/// Maps snake_case update kinds (`message`, `callback_query`, ...) to teloxide's enum.
pub fn parse_allowed_updates(kinds: &[String]) -> Result<Vec<AllowedUpdate>> {
    kinds
        .iter()
        .map(|kind| {
            serde_json::from_value(Value::String(kind.clone()))
                .map_err(|_| WebhookError::Config(format!("Unknown update kind in allowed_updates: {}", kind)))
        })
        .collect()
}

/// Transport failures become `Network`; anything the API answered becomes `RegistrationFailed`.
fn map_request_error(e: RequestError) -> WebhookError {
    match e {
        RequestError::Network(e) => WebhookError::Network(e.to_string()),
        RequestError::Io(e) => WebhookError::Network(e.to_string()),
        other => WebhookError::RegistrationFailed(other.to_string()),
    }
}

/// Copies teloxide's webhook status into the transport-agnostic shape. Empty strings become `None`.
fn webhook_info_from(info: teloxide::types::WebhookInfo) -> WebhookInfo {
    let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());
    WebhookInfo {
        url: info.url.map(|url| url.to_string()),
        has_custom_certificate: info.has_custom_certificate,
        pending_update_count: info.pending_update_count,
        ip_address: info.ip_address.map(|ip| ip.to_string()),
        last_error_date: info.last_error_date.map(|date| date.timestamp()),
        last_error_message: info.last_error_message.and_then(non_empty),
        max_connections: info.max_connections.map(|n| u8::try_from(n).unwrap_or(u8::MAX)),
        allowed_updates: info
            .allowed_updates
            .map(|kinds| kinds.iter().filter_map(update_kind_name).collect()),
    }
}

/// Inverse of [`parse_allowed_updates`].
fn update_kind_name(kind: &AllowedUpdate) -> Option<String> {
    match serde_json::to_value(kind) {
        Ok(Value::String(name)) => Some(name),
        _ => None,
    }
}
