use std::fmt;
use std::str::FromStr;

use log::{debug, error};
use serde_json::Value;

use crate::error::{BotError, BotResult};

/// Review status of a submission as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Fixed human-readable verdict for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnexpectedStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing a submission against the last seen status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// Status carried by the submission.
    pub status: HomeworkStatus,
    /// Notification text, present only when the status changed.
    pub message: Option<String>,
}

/// Interpret a submission against the previously seen status.
///
/// Does not touch `last_status`; recording the new status is up to the caller.
///
/// # Errors
///
/// Returns an error if:
/// - `status` is missing ([`BotError::MissingField`])
/// - `status` is outside the documented set ([`BotError::UnexpectedStatus`])
/// - `homework_name` is missing ([`BotError::MissingField`]) or not a string
pub fn interpret(
    submission: &Value,
    last_status: Option<HomeworkStatus>,
) -> BotResult<Interpretation> {
    let raw_status = match submission.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => return Err(BotError::missing("the homework", &["status"])),
    };

    let name = submission
        .get("homework_name")
        .ok_or_else(|| BotError::missing("the homework", &["homework_name"]))?
        .as_str()
        .ok_or_else(|| BotError::type_mismatch("homework_name", "a string"))?;

    let status = raw_status.parse::<HomeworkStatus>().inspect_err(|e| {
        error!("{}", e);
    })?;

    if last_status == Some(status) {
        debug!("Status '{}' of \"{}\" has not changed", status, name);
        return Ok(Interpretation {
            status,
            message: None,
        });
    }

    Ok(Interpretation {
        status,
        message: Some(format!(
            "Review status changed for \"{}\". {}",
            name,
            status.verdict()
        )),
    })
}
