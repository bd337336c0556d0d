use thiserror::Error;

/// Error types for the homework bot.
///
/// Every failure a polling cycle can hit is a distinct variant, so the loop
/// can match on the kind instead of inspecting messages. Only
/// [`BotError::Configuration`] stops the process; the rest are reported and
/// the loop carries on.
#[derive(Debug, Error)]
pub enum BotError {
    /// Required settings are missing or unparseable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP request failed or returned a non-200 status.
    #[error("request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// A field has the wrong JSON type.
    #[error("'{field}' must be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// One or more required keys are absent.
    #[error("missing required keys in {context}: {}", .keys.join(", "))]
    MissingField { context: String, keys: Vec<String> },

    /// The API reported an `error` for the request.
    #[error("request rejected by the API: {0}")]
    RequestRejected(String),

    /// The API reported a failure `code`.
    #[error("{origin} reported error {code}: {message}")]
    Response {
        code: String,
        origin: String,
        message: String,
    },

    /// The submission carries a status outside the documented set.
    #[error("undocumented homework status: {0}")]
    UnexpectedStatus(String),
}

impl BotError {
    pub(crate) fn missing(context: impl Into<String>, keys: &[&str]) -> Self {
        BotError::MissingField {
            context: context.into(),
            keys: keys.iter().map(|key| key.to_string()).collect(),
        }
    }

    pub(crate) fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        BotError::TypeMismatch {
            field: field.into(),
            expected,
        }
    }
}

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;
