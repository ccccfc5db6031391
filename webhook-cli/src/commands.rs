//! Command bodies. Every failure is printed as one line; nothing propagates out of a command.

use std::io::{self, Write};

use tracing::debug;
use webhook_core::{ClientFactory, WebhookError, WebhookInfo, WebhookManager};

use crate::cli::Commands;

/// Line-oriented command output: `info` for success, `comment` for progress, `error` for failures.
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn info(&mut self, line: &str) {
        self.line(line);
    }

    pub fn comment(&mut self, line: &str) {
        self.line(line);
    }

    pub fn error(&mut self, line: &str) {
        debug!(output = %line, "Command failed");
        self.line(&format!("Error: {}", line));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) {
        // Write failures are ignored.
        let _ = writeln!(self.out, "{}", line);
    }
}

/// Runs one management command. `serve` is handled by the binary and ignored here.
pub async fn run_command<F, W>(manager: &WebhookManager<F>, command: Commands, console: &mut Console<W>)
where
    F: ClientFactory,
    W: Write,
{
    match command {
        Commands::WebhookRegister { bot } => register(manager, bot.as_deref(), console).await,
        Commands::WebhookInfo { bot } => info(manager, bot.as_deref(), console).await,
        Commands::WebhookRemove {
            bot,
            drop_pending_updates,
        } => remove(manager, bot.as_deref(), drop_pending_updates, console).await,
        Commands::BotsList => list_bots(manager, console),
        Commands::Serve { .. } => {}
    }
}

pub async fn register<F: ClientFactory, W: Write>(
    manager: &WebhookManager<F>,
    bot: Option<&str>,
    console: &mut Console<W>,
) {
    let bot = match manager.registry().resolve(bot) {
        Ok(bot) => bot,
        Err(e) => return console.error(&e.to_string()),
    };
    console.comment(&format!("Registering webhook for [{}] bot!", bot.name));

    match manager.register_bot(bot).await {
        Ok(_) => console.info("Success: Your webhook has been set!"),
        Err(WebhookError::RegistrationFailed(reason)) => {
            console.error(&format!("Your webhook could not be registered! {}", reason))
        }
        Err(e) => console.error(&e.to_string()),
    }
}

pub async fn info<F: ClientFactory, W: Write>(
    manager: &WebhookManager<F>,
    bot: Option<&str>,
    console: &mut Console<W>,
) {
    match manager.info(bot).await {
        Ok((bot, info)) => print_info(&bot.name, &info, console),
        Err(e) => console.error(&e.to_string()),
    }
}

fn print_info<W: Write>(bot: &str, info: &WebhookInfo, console: &mut Console<W>) {
    let Some(ref url) = info.url else {
        return console.info(&format!("No webhook is set for [{}] bot.", bot));
    };
    console.info(&format!("Webhook info for [{}] bot:", bot));
    console.info(&format!("  URL: {}", url));
    console.info(&format!("  Pending updates: {}", info.pending_update_count));
    console.info(&format!(
        "  Custom certificate: {}",
        if info.has_custom_certificate { "yes" } else { "no" }
    ));
    if let Some(max_connections) = info.max_connections {
        console.info(&format!("  Max connections: {}", max_connections));
    }
    if let Some(ref ip_address) = info.ip_address {
        console.info(&format!("  IP address: {}", ip_address));
    }
    if let Some(ref kinds) = info.allowed_updates {
        console.info(&format!("  Allowed updates: {}", kinds.join(", ")));
    }
    if let Some(ref message) = info.last_error_message {
        match info.last_error_date {
            Some(date) => console.info(&format!("  Last error: {} (unix time {})", message, date)),
            None => console.info(&format!("  Last error: {}", message)),
        }
    }
}

pub async fn remove<F: ClientFactory, W: Write>(
    manager: &WebhookManager<F>,
    bot: Option<&str>,
    drop_pending_updates: bool,
    console: &mut Console<W>,
) {
    let bot = match manager.registry().resolve(bot) {
        Ok(bot) => bot,
        Err(e) => return console.error(&e.to_string()),
    };
    console.comment(&format!("Removing webhook for [{}] bot!", bot.name));

    match manager.remove(Some(bot.name.as_str()), drop_pending_updates).await {
        Ok(_) => console.info("Success: Your webhook has been removed!"),
        Err(WebhookError::RegistrationFailed(reason)) => {
            console.error(&format!("Your webhook could not be removed! {}", reason))
        }
        Err(e) => console.error(&e.to_string()),
    }
}

pub fn list_bots<F: ClientFactory, W: Write>(manager: &WebhookManager<F>, console: &mut Console<W>) {
    let registry = manager.registry();
    if registry.is_empty() {
        return console.info("No bots configured.");
    }
    for name in registry.names() {
        let Some(bot) = registry.get(name) else {
            continue;
        };
        let url = manager
            .configurator()
            .resolve_url(bot)
            .unwrap_or_else(|e| format!("<{}>", e));
        let marker = if registry.default_name() == Some(name) {
            " (default)"
        } else {
            ""
        };
        console.info(&format!("{}{}: {}", name, marker, url));
    }
}
