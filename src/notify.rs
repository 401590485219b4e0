//! Telegram notifications
//!
//! Outbound-only sendMessage wrapper used by the scheduler and the CLI.
//! HTML parse mode is always on; the report relies on bold markup.

use crate::error::{BotError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct Notifier {
    http: Client,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
    parse_mode: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

impl Notifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
        }
    }

    /// Send a message to the configured chat.
    pub async fn send(&self, text: &str) -> Result<()> {
        self.send_to(&self.chat_id, text).await
    }

    /// Send a message to an explicit chat (command replies).
    pub async fn send_to(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: "HTML".to_string(),
        };

        let response: SendMessageResponse =
            self.http.post(&url).json(&request).send().await?.json().await?;

        if !response.ok {
            return Err(BotError::Telegram(
                response
                    .description
                    .unwrap_or_else(|| "sendMessage rejected".to_string()),
            ));
        }
        Ok(())
    }
}
