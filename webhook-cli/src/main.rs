//! tgwebhook: manage Telegram webhooks for the bots in a TOML config, or serve the receiver.

use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use webhook_cli::{load_config, run_command, Cli, Commands, Console};
use webhook_core::{init_tracing, WebhookManager};
use webhook_server::{serve, LoggingUpdateHandler, ReceiverState};
use webhook_telegram::TelegramClientFactory;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/tgwebhook.log".to_string());
    init_tracing(&log_file)?;

    let mut console = Console::stdout();
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            console.error(&e.to_string());
            return Ok(());
        }
    };

    match cli.command {
        Commands::Serve { listen } => {
            let state = ReceiverState::from_config(&config, Arc::new(LoggingUpdateHandler));
            serve(listen, Arc::new(state)).await
        }
        command => {
            let factory = TelegramClientFactory::from_config(&config);
            let manager = WebhookManager::from_config(&config, factory);
            run_command(&manager, command, &mut console).await;
            Ok(())
        }
    }
}
