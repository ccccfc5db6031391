use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Bot [{0}] is not configured")]
    UnknownBot(String),

    #[error("No bot name given and no default bot configured")]
    NoDefaultBot,

    #[error("Webhook registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No webhook URL could be computed for bot [{0}]: set webhook.url or app_url")]
    MissingWebhookUrl(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WebhookError>;
