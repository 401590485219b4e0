//! Configuration loading
//!
//! TOML file with serde defaults for every section, so a config file
//! containing nothing but the bot token is a valid setup. The token may
//! also come from the `TELEGRAM_BOT_TOKEN` environment variable (a
//! `.env` file is honored), which overrides the file.

use crate::error::{BotError, Result};
use serde::Deserialize;
use std::path::Path;

/// Browser-like user agent, reduces the chance of scrapes being blocked.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token; empty means not configured.
    #[serde(default)]
    pub bot_token: String,
    /// Destination for the scheduled daily report.
    #[serde(default = "default_chat_id")]
    pub chat_id: String,
    #[serde(default = "default_daily_hour")]
    pub daily_hour: u32,
    #[serde(default)]
    pub daily_minute: u32,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: default_chat_id(),
            daily_hour: default_daily_hour(),
            daily_minute: 0,
            timezone: default_timezone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// One row per upstream source: where to fetch and how to correct units.
/// Swapping a URL or a divisor is a config change, not a code change.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    pub url: String,
    /// Divide parsed rates by this before formatting (e.g. 100 for
    /// sources quoting in hundredths).
    #[serde(default)]
    pub scale_divisor: Option<f64>,
}

impl SourceEntry {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            scale_divisor: None,
        }
    }

    fn scaled(url: &str, divisor: f64) -> Self {
        Self {
            url: url.to_string(),
            scale_divisor: Some(divisor),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub cursbanci: SourceEntry,
    pub kantor: SourceEntry,
    pub bulbank: SourceEntry,
    pub noi: SourceEntry,
    pub privatbank: SourceEntry,
    pub coingecko: SourceEntry,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            cursbanci: SourceEntry::new("https://cursbanci.ro/ru/curs-valutar-banci"),
            kantor: SourceEntry::scaled("https://kantorstalowawola.tadek.pl/", 100.0),
            bulbank: SourceEntry::new(
                "https://www.unicreditbulbank.bg/bg/kursove-indeksi/valutni-kursove/",
            ),
            noi: SourceEntry::new("https://noi.md/ru/curs/"),
            privatbank: SourceEntry::new("https://privatbank.ua/rates-archive"),
            coingecko: SourceEntry::new(
                "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd",
            ),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, overlaying the bot token
    /// from the environment when present. A missing token is fatal.
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder();
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }
        let mut cfg: Config = builder.build()?.try_deserialize()?;

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                cfg.telegram.bot_token = token;
            }
        }

        if cfg.telegram.bot_token.is_empty() {
            return Err(BotError::MissingBotToken);
        }

        Ok(cfg)
    }

    /// Shared client for the scraping sources; the Telegram long-poll
    /// uses its own client so the scrape timeout does not cap it.
    pub fn scrape_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.http.timeout_secs))
            .user_agent(self.http.user_agent.clone())
            .build()?;
        Ok(client)
    }
}

fn default_chat_id() -> String {
    "-1002510214338".to_string()
}

fn default_daily_hour() -> u32 {
    13
}

fn default_timezone() -> String {
    "Europe/Kiev".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
