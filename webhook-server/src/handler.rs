//! Consumers of validated webhook updates.

use async_trait::async_trait;
use teloxide::types::Update;
use tracing::{info, instrument};

/// Receives each validated update together with the name of the bot it was delivered to.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, bot: &str, update: Update) -> anyhow::Result<()>;
}

/// Logs every update and accepts it.
pub struct LoggingUpdateHandler;

#[async_trait]
impl UpdateHandler for LoggingUpdateHandler {
    #[instrument(skip(self, update))]
    async fn handle(&self, bot: &str, update: Update) -> anyhow::Result<()> {
        info!(
            update_id = ?update.id,
            chat_id = ?update.chat().map(|chat| chat.id),
            "Received update"
        );
        Ok(())
    }
}
