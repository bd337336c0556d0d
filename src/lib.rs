//! Homework Bot - review status notifications for Practicum homework.
//!
//! This library polls the Practicum homework-status API, validates each
//! response, detects when the latest submission changes status, and reports
//! the change to a Telegram chat.
//!
//! # Core Components
//!
//! * [`config`] - Environment configuration and the credential check
//! * [`api`] - Homework-status API client
//! * [`validator`] - Ordered structural checks on API responses
//! * [`status`] - Status parsing and change detection
//! * [`notifier`] - Telegram delivery
//! * [`bot`] - The polling loop and its state
//! * [`error`] - Error kinds shared by every stage
//!
//! # Quick Start
//!
//! ```no_run
//! use homework_bot::*;
//!
//! let config = Config::load()?;
//! let client = ReviewClient::new(&config.endpoint, &config.credentials.practicum_token);
//! let notifier = TelegramNotifier::new(
//!     &config.telegram_api_url,
//!     &config.credentials.telegram_token,
//!     &config.credentials.telegram_chat_id,
//! );
//! let bot = HomeworkBot::new(client, notifier, config.retry_period);
//! bot.run(BotState::starting_now());
//! # Ok::<(), BotError>(())
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod notifier;
pub mod status;
pub mod validator;

// Re-export commonly used types for convenience
pub use api::{ReviewClient, ReviewSource};
pub use bot::{BotState, HomeworkBot};
pub use config::{Config, Credentials, check_tokens};
pub use error::{BotError, BotResult};
pub use notifier::{Notifier, TelegramNotifier};
pub use status::{HomeworkStatus, Interpretation, interpret};
pub use validator::validate;
