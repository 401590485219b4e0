//! Telegram bot for receiving commands
//!
//! Long-polls getUpdates and answers two commands: /rate replies to the
//! requester with a freshly built report, /start with a readiness
//! string. Replies go to whichever chat the command came from.

use crate::config::SourcesConfig;
use crate::error::Result;
use crate::notify::Notifier;
use crate::report;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

const READY_TEXT: &str = "🤖 RateRadar бот активен и готов к работе.";

/// Telegram bot for receiving commands
pub struct TelegramBot {
    http: Client,
    bot_token: String,
    last_update_id: RwLock<i64>,
    notifier: Notifier,
    scrape_client: Client,
    sources: SourcesConfig,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct GetUpdatesResponse {
    ok: bool,
    result: Vec<TelegramUpdate>,
}

impl TelegramBot {
    pub fn new(
        bot_token: String,
        notifier: Notifier,
        scrape_client: Client,
        sources: SourcesConfig,
    ) -> Self {
        Self {
            // Own client without the scrape timeout; getUpdates long-polls
            // for 30 s at a time.
            http: Client::new(),
            bot_token,
            last_update_id: RwLock::new(0),
            notifier,
            scrape_client,
            sources,
        }
    }

    /// Start polling for updates
    pub async fn start_polling(self: Arc<Self>) {
        tracing::info!("Starting Telegram command listener...");

        loop {
            match self.poll_updates().await {
                Ok(updates) => {
                    for update in updates {
                        if let Some(msg) = update.message {
                            if let Some(text) = msg.text {
                                self.handle_message(msg.chat.id, &text).await;
                            }
                        }

                        let mut last_id = self.last_update_id.write().await;
                        *last_id = update.update_id + 1;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to poll Telegram updates: {}", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                }
            }

            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
        }
    }

    async fn poll_updates(&self) -> Result<Vec<TelegramUpdate>> {
        let last_id = *self.last_update_id.read().await;

        let url = format!(
            "https://api.telegram.org/bot{}/getUpdates?offset={}&timeout=30",
            self.bot_token, last_id
        );

        let response: GetUpdatesResponse = self.http.get(&url).send().await?.json().await?;

        Ok(response.result)
    }

    async fn handle_message(&self, chat_id: i64, text: &str) {
        let text = text.trim();

        let cmd = if let Some(rest) = text.strip_prefix('/') {
            let cmd = rest.split_whitespace().next().unwrap_or(rest);
            cmd.split('@').next().unwrap_or(cmd)
        } else {
            return; // Ignore non-commands
        };

        tracing::info!("Received command: /{}", cmd);

        match cmd.to_lowercase().as_str() {
            "rate" => {
                let text = report::build(&self.scrape_client, &self.sources).await;
                self.reply(chat_id, &text).await;
            }
            "start" => {
                self.reply(chat_id, READY_TEXT).await;
            }
            _ => {
                self.reply(
                    chat_id,
                    &format!("❓ Unknown command: /{}\nAvailable: /rate, /start", cmd),
                )
                .await;
            }
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.notifier.send_to(&chat_id.to_string(), text).await {
            tracing::error!("Failed to send Telegram reply: {}", e);
        }
    }
}
