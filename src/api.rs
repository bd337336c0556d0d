use log::{debug, error};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{BotError, BotResult};

/// Anything that can answer "what changed since this timestamp".
///
/// The polling loop only depends on this trait, so tests can feed it canned
/// responses instead of talking to the network.
pub trait ReviewSource {
    /// Fetch the raw review-status response for activity after `since`.
    fn fetch(&self, since: i64) -> BotResult<Value>;
}

impl<T: ReviewSource + ?Sized> ReviewSource for &T {
    fn fetch(&self, since: i64) -> BotResult<Value> {
        (**self).fetch(since)
    }
}

/// Blocking client for the Practicum homework-status API.
pub struct ReviewClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl ReviewClient {
    /// Create a new ReviewClient.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the homework statuses endpoint
    /// * `token` - Practicum API token
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new ReviewClient with a custom HTTP client.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    fn request_error(&self, reason: impl ToString) -> BotError {
        BotError::Request {
            endpoint: self.endpoint.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ReviewSource for ReviewClient {
    /// Request homework statuses updated after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent or times out ([`BotError::Request`])
    /// - The API answers with anything but HTTP 200 ([`BotError::Request`])
    /// - The body is not valid JSON ([`BotError::Decode`])
    fn fetch(&self, since: i64) -> BotResult<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .map_err(|e| {
                error!("Request to {} failed: {}", self.endpoint, e);
                self.request_error(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Request to {} returned HTTP {}", self.endpoint, status);
            return Err(self.request_error(format!("unexpected HTTP status {}", status)));
        }

        let body = response.text().map_err(|e| {
            error!("Failed to read response body from {}: {}", self.endpoint, e);
            self.request_error(e)
        })?;

        let decoded: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode response from {}: {}", self.endpoint, e);
            BotError::Decode {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!("Request to {} succeeded: HTTP {}", self.endpoint, status);
        Ok(decoded)
    }
}
