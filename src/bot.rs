use std::{thread, time::Duration};

use chrono::{DateTime, Utc};
use log::{debug, error, info};

use crate::api::ReviewSource;
use crate::error::{BotError, BotResult};
use crate::notifier::Notifier;
use crate::status::{HomeworkStatus, interpret};
use crate::validator::{current_date, latest_homework, validate};

/// State carried from one polling cycle to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotState {
    /// Status of the latest submission seen on the previous successful cycle.
    pub last_status: Option<HomeworkStatus>,
    /// Last failure message sent to the chat.
    pub last_error: Option<String>,
    /// `from_date` for the next request.
    pub watermark: i64,
}

impl BotState {
    /// Fresh state polling from `watermark` onwards.
    pub fn new(watermark: i64) -> Self {
        Self {
            last_status: None,
            last_error: None,
            watermark,
        }
    }

    /// Fresh state polling from the current time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now().timestamp())
    }
}

/// What a single cycle produced, before it is folded back into [`BotState`].
#[derive(Debug)]
enum CycleOutcome {
    NoHomeworks,
    Unchanged(HomeworkStatus),
    Changed {
        status: HomeworkStatus,
        message: String,
        current_date: i64,
    },
}

/// Polls a [`ReviewSource`] and reports status changes through a [`Notifier`].
pub struct HomeworkBot<S, N> {
    source: S,
    notifier: N,
    retry_period: Duration,
}

impl<S: ReviewSource, N: Notifier> HomeworkBot<S, N> {
    pub fn new(source: S, notifier: N, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            retry_period,
        }
    }

    /// Run one polling cycle and return the state for the next one.
    ///
    /// Never fails: errors are logged and reported to the chat, unless the
    /// same failure message was the last one reported.
    pub fn step(&self, state: BotState) -> BotState {
        match self.poll(&state) {
            Ok(CycleOutcome::NoHomeworks) => {
                debug!("No homework updates since {}", format_timestamp(state.watermark));
                state
            }
            Ok(CycleOutcome::Unchanged(status)) => BotState {
                last_status: Some(status),
                ..state
            },
            Ok(CycleOutcome::Changed {
                status,
                message,
                current_date,
            }) => {
                info!("Homework status changed to '{}'", status);
                self.notifier.notify(&message);
                BotState {
                    last_status: Some(status),
                    watermark: current_date,
                    ..state
                }
            }
            Err(e) => {
                let message = format!("Bot failure: {}", e);
                error!("{}", message);
                if state.last_error.as_deref() == Some(message.as_str()) {
                    debug!("Failure already reported, not notifying again");
                    return state;
                }
                self.notifier.notify(&message);
                BotState {
                    last_error: Some(message),
                    ..state
                }
            }
        }
    }

    /// Poll forever, sleeping the retry period after every cycle.
    pub fn run(&self, mut state: BotState) -> ! {
        info!(
            "Polling every {}s starting from {}",
            self.retry_period.as_secs(),
            format_timestamp(state.watermark)
        );
        loop {
            state = self.step(state);
            thread::sleep(self.retry_period);
        }
    }

    fn poll(&self, state: &BotState) -> BotResult<CycleOutcome> {
        let response = self.source.fetch(state.watermark)?;
        validate(&response)?;

        let Some(latest) = latest_homework(&response) else {
            return Ok(CycleOutcome::NoHomeworks);
        };

        let interpretation = interpret(latest, state.last_status)?;
        match interpretation.message {
            Some(message) => Ok(CycleOutcome::Changed {
                status: interpretation.status,
                message,
                current_date: current_date(&response)
                    .ok_or_else(|| BotError::type_mismatch("current_date", "an integer"))?,
            }),
            None => Ok(CycleOutcome::Unchanged(interpretation.status)),
        }
    }
}

fn format_timestamp(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|moment| moment.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
