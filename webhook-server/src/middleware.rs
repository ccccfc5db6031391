//! Validation in front of the receiver route: host, bot, token, secret token.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::header;
use axum::http::uri::Authority;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ReceiverError;
use crate::server::ReceiverState;

/// Header Telegram uses to echo the `secret_token` set with the webhook.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Rejects requests for a foreign host, an unknown bot, a token that is not the bot's own,
/// or a missing / wrong secret token when the bot has one configured.
#[tracing::instrument(skip(state, token, request, next))]
pub async fn validate_webhook(
    State(state): State<Arc<ReceiverState>>,
    Path((token, bot)): Path<(String, String)>,
    request: Request,
    next: Next,
) -> Result<Response, ReceiverError> {
    if let Some(domain) = state.configurator.global().domain() {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| request.uri().authority().map(|a| a.as_str()));
        if !host.is_some_and(|host| same_host(host, domain)) {
            warn!(host = ?host, "Webhook request for a foreign host");
            return Err(ReceiverError::NotFound);
        }
    }

    let config = state.registry.get(&bot).ok_or_else(|| {
        warn!("Webhook request for an unknown bot");
        ReceiverError::NotFound
    })?;
    if !secret_eq(&config.token, &token) {
        warn!("Webhook request with a token that does not match the bot");
        return Err(ReceiverError::NotFound);
    }

    if let Some(expected) = state.configurator.merged_params(config).secret_token {
        let provided = request
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if !provided.is_some_and(|provided| secret_eq(provided, &expected)) {
            warn!("Webhook request with a missing or wrong secret token");
            return Err(ReceiverError::InvalidSecret);
        }
    }

    Ok(next.run(request).await)
}

/// Compares host names, ignoring ports and ASCII case. Unparseable authorities never match.
fn same_host(authority: &str, domain: &str) -> bool {
    match (authority.parse::<Authority>(), domain.parse::<Authority>()) {
        (Ok(authority), Ok(domain)) => authority.host().eq_ignore_ascii_case(domain.host()),
        _ => false,
    }
}

fn secret_eq(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_host_ignores_port_and_case() {
        assert!(same_host("Bots.Example.org:443", "bots.example.org"));
        assert!(same_host("bots.example.org", "bots.example.org:8443"));
        assert!(!same_host("evil.example.org", "bots.example.org"));
    }

    #[test]
    fn test_same_host_ipv6_literals() {
        assert!(same_host("[::1]:8080", "[::1]"));
        assert!(!same_host("[::1]:8080", "[::2]"));
        assert!(!same_host("[::1]", "bots.example.org"));
        assert!(!same_host("not a host", "bots.example.org"));
    }

    #[test]
    fn test_secret_eq() {
        assert!(secret_eq("s3cret", "s3cret"));
        assert!(!secret_eq("s3cret", "s3cre"));
        assert!(!secret_eq("s3cret", "S3CRET"));
    }
}
