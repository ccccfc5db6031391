//! # webhook-cli
//!
//! `tgwebhook` command surface: argument parsing, config loading and the webhook commands.

pub mod cli;
pub mod commands;

pub use cli::{load_config, Cli, Commands};
pub use commands::{run_command, Console};
