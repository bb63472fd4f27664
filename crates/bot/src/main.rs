//! Homework status notifier bot.
//!
//! Polls the Practicum homework-review API and forwards status-change
//! notifications to a Telegram chat. Runs until externally terminated.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use homework_bot_core::{Credentials, Monitor, PollState};
use homework_bot_practicum::{DEFAULT_ENDPOINT, PracticumClient};
use homework_bot_telegram::TelegramBot;

/// Exit code for the startup credential gate, distinct from the generic
/// failure exit a returned error produces.
const EXIT_MISSING_CREDENTIALS: i32 = 2;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Polls Practicum homework statuses and notifies a Telegram chat")]
struct Cli {
    /// Seconds to wait between poll cycles
    #[arg(long, env = "RETRY_PERIOD", default_value = "600")]
    interval_secs: u64,

    /// Append-only log file written alongside console output
    #[arg(long, env = "LOG_FILE", default_value = "homework-bot.log")]
    log_file: PathBuf,

    /// Homework-statuses endpoint URL
    #[arg(long, env = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;
    info!("Homework bot starting");

    let credentials = Credentials::from_env();
    if !credentials.is_complete() {
        // No network activity may happen without the full triple.
        error!("missing required environment variables (PRACT_TOKEN, TG_TOKEN, TG_CHAT_ID)");
        std::process::exit(EXIT_MISSING_CREDENTIALS);
    }

    let source = PracticumClient::new(&credentials.practicum_token)
        .context("Failed to build Practicum client")?
        .with_endpoint(&cli.endpoint);
    let notifier = TelegramBot::new(&credentials.telegram_token, &credentials.chat_id);

    let state = PollState::starting_at(Utc::now().timestamp());
    let mut monitor = Monitor::new(
        source,
        notifier,
        state,
        Duration::from_secs(cli.interval_secs),
    );

    // Never returns; cycle failures are logged inside the loop.
    monitor.run().await;
    Ok(())
}

/// Console plus append-only file, the file without ANSI colors.
fn init_logging(log_file: &PathBuf) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Arc::new(file)))
        .init();

    Ok(())
}
