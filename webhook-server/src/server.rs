//! Receiver router `POST {path}/{token}/{bot}` and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;
use teloxide::types::Update;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};
use webhook_core::{BotRegistry, TelegramConfig, WebhookConfigurator};

use crate::error::ReceiverError;
use crate::handler::UpdateHandler;
use crate::middleware::validate_webhook;

/// Immutable state shared by all requests.
pub struct ReceiverState {
    pub registry: BotRegistry,
    pub configurator: WebhookConfigurator,
    pub handler: Arc<dyn UpdateHandler>,
}

impl ReceiverState {
    pub fn new(
        registry: BotRegistry,
        configurator: WebhookConfigurator,
        handler: Arc<dyn UpdateHandler>,
    ) -> Self {
        Self {
            registry,
            configurator,
            handler,
        }
    }

    pub fn from_config(config: &TelegramConfig, handler: Arc<dyn UpdateHandler>) -> Self {
        Self::new(
            BotRegistry::from_config(config),
            WebhookConfigurator::new(config.global.webhook.clone(), config.app_url.clone()),
            handler,
        )
    }
}

/// Builds the receiver router, nested under the configured path prefix.
pub fn router(state: Arc<ReceiverState>) -> Router {
    let prefix = state.configurator.global().route_prefix();

    let routes = Router::new()
        .route("/{token}/{bot}", post(receive_update))
        .route_layer(from_fn_with_state(state.clone(), validate_webhook))
        .with_state(state);

    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&prefix, routes)
    };
    app.layer(TraceLayer::new_for_http())
}

#[instrument(skip(state, _token, body))]
async fn receive_update(
    State(state): State<Arc<ReceiverState>>,
    Path((_token, bot)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ReceiverError> {
    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Discarding malformed update");
        ReceiverError::MalformedUpdate(e.to_string())
    })?;

    state.handler.handle(&bot, update).await.map_err(|e| {
        error!(error = %e, "Update handler failed");
        ReceiverError::Handler(e.to_string())
    })?;

    Ok(StatusCode::OK)
}

/// Serves the receiver on `listen` until Ctrl-C.
pub async fn serve(listen: SocketAddr, state: Arc<ReceiverState>) -> anyhow::Result<()> {
    let prefix = state.configurator.global().route_prefix();
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Bind webhook receiver on {}", listen))?;

    info!(
        listen = %listen,
        route = %format!("{}/{{token}}/{{bot}}", prefix),
        bots = state.registry.len(),
        "Webhook receiver listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook receiver failed")?;

    info!("Webhook receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
