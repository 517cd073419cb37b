//! Telegram Bot API delivery.
//!
//! [`TelegramNotifier`] posts an HTML-formatted message with a "Go to watch"
//! button to a configured chat. Movies with an absolute poster URL are sent
//! as a photo with the same caption.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::notifier::{MovieAnnouncement, MovieNotifier, NotifyError};

/// Default Bot API origin.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Label of the inline button linking to the movie page.
const WATCH_BUTTON_TEXT: &str = "Go to watch";

/// Credentials and target chat for the Telegram channel.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Bot API origin; overridable for self-hosted Bot API servers.
    pub api_base: String,
}

impl TelegramConfig {
    /// Load the channel configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                    |
    /// |----------------------|----------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN` | no       | --                         |
    /// | `TELEGRAM_CHAT_ID`   | no       | --                         |
    /// | `TELEGRAM_API_BASE`  | no       | `https://api.telegram.org` |
    ///
    /// Returns `None` unless both token and chat id are set and non-empty,
    /// which leaves notifications disabled.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        if bot_token.trim().is_empty() || chat_id.trim().is_empty() {
            return None;
        }
        let api_base =
            std::env::var("TELEGRAM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Some(Self {
            bot_token,
            chat_id,
            api_base,
        })
    }

    /// Full URL of a Bot API method.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

/// Delivers movie announcements to a Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Create a notifier with a pre-configured HTTP client.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Execute a single Bot API call and check the response.
    async fn call(&self, method: &str, payload: &Value) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.config.method_url(method))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Bot API errors carry `{"ok": false, "description": "..."}`.
        let description = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body["description"].as_str().map(str::to_owned))
            .unwrap_or_default();
        Err(NotifyError::Api {
            status: status.as_u16(),
            description,
        })
    }
}

#[async_trait]
impl MovieNotifier for TelegramNotifier {
    async fn movie_published(&self, announcement: &MovieAnnouncement) -> Result<(), NotifyError> {
        let (method, payload) = build_request(&self.config.chat_id, announcement);
        self.call(method, &payload).await?;
        tracing::info!(title = %announcement.title, method, "Movie announced on Telegram");
        Ok(())
    }
}

/// Choose the Bot API method and build its JSON body.
fn build_request(chat_id: &str, announcement: &MovieAnnouncement) -> (&'static str, Value) {
    let caption = format!("<b>{}</b>", escape_html(&announcement.title));
    let reply_markup = json!({
        "inline_keyboard": [[
            { "url": announcement.watch_url, "text": WATCH_BUTTON_TEXT }
        ]]
    });

    if is_absolute_url(&announcement.poster) {
        (
            "sendPhoto",
            json!({
                "chat_id": chat_id,
                "photo": announcement.poster,
                "caption": caption,
                "parse_mode": "HTML",
                "reply_markup": reply_markup,
            }),
        )
    } else {
        (
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": caption,
                "parse_mode": "HTML",
                "reply_markup": reply_markup,
            }),
        )
    }
}

fn is_absolute_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Escape the three characters Telegram's HTML parse mode requires.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
