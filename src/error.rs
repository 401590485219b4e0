//! Error types for the rates bot
//!
//! Extractors never surface these: every fetch/parse failure becomes an
//! in-band sentinel inside the quote. `BotError` covers the startup and
//! delivery boundaries only.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("bot token is missing: set telegram.bot_token or TELEGRAM_BOT_TOKEN")]
    MissingBotToken,

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),
}
