use anyhow::{Context, Result};
use log::{error, info};

use homework_bot::{BotState, Config, HomeworkBot, ReviewClient, TelegramNotifier};

/// Homework Bot - Telegram notifications for Practicum homework reviews.
///
/// Polls the Practicum homework-status API and messages a Telegram chat
/// whenever the review status of the latest submission changes. Failures are
/// reported to the same chat, once per distinct failure.
///
/// # Environment Variables
///
/// Required:
/// * `PRACTICUM_TOKEN` - Practicum API OAuth token
/// * `TELEGRAM_TOKEN` - Telegram bot token
/// * `TELEGRAM_CHAT_ID` - Chat that receives notifications
///
/// Optional (with defaults):
/// * `PRACTICUM_ENDPOINT` - Homework-status endpoint (default: the Practicum API)
/// * `TELEGRAM_API_URL` - Bot API base URL (default: "https://api.telegram.org")
/// * `RETRY_PERIOD` - Seconds between polls (default: "600")
///
/// Variables may also be placed in a `.env` file in the working directory.
///
/// # Usage
///
/// ```bash
/// export PRACTICUM_TOKEN="..."
/// export TELEGRAM_TOKEN="123456:ABC..."
/// export TELEGRAM_CHAT_ID="123456789"
/// ./homework-bot
/// ```
fn main() -> Result<()> {
    // Initialize logger to output to stdout, using RUST_LOG env var or debug level by default
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stdout)
        .filter_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|level| level.parse().ok())
                .unwrap_or(log::LevelFilter::Debug),
        )
        .init();

    // A missing .env is fine, the variables may come from the environment
    dotenvy::dotenv().ok();

    let config = Config::load()
        .inspect_err(|e| error!("Refusing to start: {}", e))
        .context("Failed to load configuration")?;

    info!("Homework Bot starting...");
    info!("Polling endpoint: {}", config.endpoint);
    info!("Notifying chat: {}", config.credentials.telegram_chat_id);

    let client = ReviewClient::new(&config.endpoint, &config.credentials.practicum_token);
    let notifier = TelegramNotifier::new(
        &config.telegram_api_url,
        &config.credentials.telegram_token,
        &config.credentials.telegram_chat_id,
    );

    HomeworkBot::new(client, notifier, config.retry_period).run(BotState::starting_now())
}
