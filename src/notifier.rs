use anyhow::Result;
use log::{debug, error};
use reqwest::blocking::Client;
use serde_json::json;

/// Best-effort delivery of a text message to the operator.
///
/// Implementations must never fail the caller: delivery problems are logged
/// and dropped.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Telegram bot that posts plain-text messages to one chat.
pub struct TelegramNotifier {
    api_url: String,
    token: String,
    chat_id: String,
    client: Client,
}

impl TelegramNotifier {
    /// Create a new TelegramNotifier.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token issued by BotFather
    /// * `chat_id` - Chat that receives every message
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
            client: Client::new(),
        }
    }

    /// Replace the HTTP client used for delivery.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Send `text` to the configured chat.
    ///
    /// Transport errors are stripped of the request URL, which embeds the token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails
    /// - The Bot API returns an error status
    pub fn send_message(&self, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.api_url, self.token))
            .json(&payload)
            .send()
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to send Telegram message: HTTP {}",
                response.status()
            ));
        }

        Ok(())
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, message: &str) {
        match self.send_message(message) {
            Ok(()) => debug!("Sent message: {}", message),
            Err(e) => error!("Failed to send message: {}", e),
        }
    }
}
