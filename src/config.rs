use std::fmt;
use std::time::Duration;

use crate::error::{BotError, BotResult};

/// Tokens the bot cannot run without.
///
/// `Debug` prints the chat id but redacts both tokens.
#[derive(Clone)]
pub struct Credentials {
    /// Practicum API token, sent as `Authorization: OAuth <token>`.
    /// Environment variable: `PRACTICUM_TOKEN`
    pub practicum_token: String,

    /// Telegram bot token.
    /// Environment variable: `TELEGRAM_TOKEN`
    pub telegram_token: String,

    /// Chat that receives every notification.
    /// Environment variable: `TELEGRAM_CHAT_ID`
    pub telegram_chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Check that every credential is present and non-empty.
///
/// # Errors
///
/// Returns [`BotError::Configuration`] naming each variable that is missing.
pub fn check_tokens(credentials: &Credentials) -> BotResult<()> {
    let missing: Vec<&str> = [
        ("PRACTICUM_TOKEN", &credentials.practicum_token),
        ("TELEGRAM_TOKEN", &credentials.telegram_token),
        ("TELEGRAM_CHAT_ID", &credentials.telegram_chat_id),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BotError::Configuration(format!(
            "required environment variables are not set: {}",
            missing.join(", ")
        )))
    }
}

/// Configuration for the homework bot loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// Review-status endpoint polled every cycle.
    /// Environment variable: `PRACTICUM_ENDPOINT`
    pub endpoint: String,

    /// Base URL of the Telegram Bot API.
    /// Environment variable: `TELEGRAM_API_URL`
    pub telegram_api_url: String,

    /// Pause between cycles.
    /// Environment variable: `RETRY_PERIOD` (seconds)
    pub retry_period: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] if any of these is unusable:
    /// - `PRACTICUM_TOKEN`: Practicum API token (required)
    /// - `TELEGRAM_TOKEN`: Telegram bot token (required)
    /// - `TELEGRAM_CHAT_ID`: Destination chat (required)
    /// - `PRACTICUM_ENDPOINT`: Endpoint URL (default: the Practicum homework statuses API)
    /// - `TELEGRAM_API_URL`: Bot API base URL (default: "https://api.telegram.org")
    /// - `RETRY_PERIOD`: Seconds between polls (default: "600")
    pub fn load() -> BotResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            practicum_token: lookup("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: lookup("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: lookup("TELEGRAM_CHAT_ID").unwrap_or_default(),
        };
        check_tokens(&credentials)?;

        let endpoint =
            lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| constants::ENDPOINT.to_string());

        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .unwrap_or_else(|| constants::TELEGRAM_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let retry_period = match lookup("RETRY_PERIOD") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                BotError::Configuration(format!("invalid RETRY_PERIOD '{}': {}", raw, e))
            })?,
            None => constants::RETRY_PERIOD_SECONDS,
        };

        Ok(Config {
            credentials,
            endpoint,
            telegram_api_url,
            retry_period: Duration::from_secs(retry_period),
        })
    }
}

/// Application constants used throughout the system.
pub mod constants {
    /// Default pause between polling cycles in seconds.
    pub const RETRY_PERIOD_SECONDS: u64 = 600;

    /// Default review-status endpoint.
    pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

    /// Default Telegram Bot API base URL.
    pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
}
