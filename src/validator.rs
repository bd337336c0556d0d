//! Structural checks on a decoded review-status response.
//!
//! Checks run in a fixed order: shape first (object, `homeworks` present and
//! an array), then the server-signalled failures (`error`, `code`), then the
//! fields the interpreter relies on. The first violation wins.

use serde_json::{Map, Value};

use crate::error::{BotError, BotResult};

const REQUIRED_HOMEWORK_KEYS: [&str; 2] = ["status", "homework_name"];

/// Validate a raw API response.
///
/// # Errors
///
/// Returns, in order of precedence:
/// - [`BotError::TypeMismatch`] if the response is not an object
/// - [`BotError::MissingField`] if `homeworks` is absent
/// - [`BotError::TypeMismatch`] if `homeworks` is not an array
/// - [`BotError::RequestRejected`] if `error` is present and truthy
/// - [`BotError::Response`] if `code` is present
/// - [`BotError::MissingField`] if the latest homework lacks `status` or `homework_name`
/// - [`BotError::MissingField`] / [`BotError::TypeMismatch`] if `current_date` is absent or not an `i64`
pub fn validate(response: &Value) -> BotResult<()> {
    let body = response
        .as_object()
        .ok_or_else(|| BotError::type_mismatch("response", "an object"))?;

    let homeworks = body
        .get("homeworks")
        .ok_or_else(|| BotError::missing("response", &["homeworks"]))?
        .as_array()
        .ok_or_else(|| BotError::type_mismatch("homeworks", "an array"))?;

    if let Some(error) = body.get("error").filter(|value| is_truthy(value)) {
        return Err(BotError::RequestRejected(render(error)));
    }

    // An explicit `"code": null` is treated the same as no `code` at all.
    if let Some(code) = body.get("code").filter(|value| !value.is_null()) {
        return Err(BotError::Response {
            code: render(code),
            origin: text_or(body, "source", "unknown source"),
            message: text_or(body, "message", "no error message"),
        });
    }

    if let Some(latest) = homeworks.last() {
        let latest = latest
            .as_object()
            .ok_or_else(|| BotError::type_mismatch("homeworks[-1]", "an object"))?;
        let missing: Vec<&str> = REQUIRED_HOMEWORK_KEYS
            .into_iter()
            .filter(|key| !latest.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(BotError::missing("the latest homework", &missing));
        }
    }

    match body.get("current_date") {
        None | Some(Value::Null) => Err(BotError::missing("response", &["current_date"])),
        Some(date) if date.is_i64() => Ok(()),
        Some(_) => Err(BotError::type_mismatch("current_date", "an integer")),
    }
}

/// The most recent submission of a validated response, if there is one.
pub fn latest_homework(response: &Value) -> Option<&Value> {
    response.get("homeworks")?.as_array()?.last()
}

/// The `current_date` of a validated response.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date")?.as_i64()
}

/// JSON truthiness: `null`, `false`, zero, and empty strings or containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn text_or(body: &Map<String, Value>, key: &str, default: &str) -> String {
    body.get(key)
        .filter(|value| !value.is_null())
        .map(render)
        .unwrap_or_else(|| default.to_string())
}
