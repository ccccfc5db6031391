//! # webhook-server
//!
//! Inbound side of the webhook: an axum route `POST {path}/{token}/{bot}` guarded by
//! [`validate_webhook`], handing parsed updates to an [`UpdateHandler`].

mod error;
mod handler;
mod middleware;
mod server;

pub use error::ReceiverError;
pub use handler::{LoggingUpdateHandler, UpdateHandler};
pub use middleware::{validate_webhook, SECRET_TOKEN_HEADER};
pub use server::{router, serve, ReceiverState};
