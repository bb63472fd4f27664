//! The poll-check-notify loop.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::Error;
use crate::response::{check_response, current_date};
use crate::status::render_status_change;

/// Source of homework status updates (the review API).
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch all homework entries updated since `from_date`.
    async fn fetch(&self, from_date: i64) -> Result<Value, Error>;
}

/// Delivery channel for notification text (the chat bot).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), Error>;
}

/// Mutable loop state, passed through cycles instead of living in globals.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Watermark sent as `from_date`; advanced to the server's
    /// `current_date` after each successful cycle.
    pub from_date: i64,
    /// Last successfully delivered message, for duplicate suppression.
    pub last_message: Option<String>,
}

impl PollState {
    pub fn starting_at(from_date: i64) -> Self {
        Self {
            from_date,
            last_message: None,
        }
    }
}

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status was translated and delivered.
    Notified(String),
    /// The newest entry produced the same message as last time.
    Unchanged,
    /// The API returned no homework entries.
    NoUpdates,
    /// A message was due but delivery failed; it will be retried next cycle.
    DeliveryFailed,
}

/// Drives the poll-check-notify loop over abstract collaborators.
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
    pub state: PollState,
    poll_interval: Duration,
}

impl<S, N> Monitor<S, N>
where
    S: StatusSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, state: PollState, poll_interval: Duration) -> Self {
        Self {
            source,
            notifier,
            state,
            poll_interval,
        }
    }

    /// Run one poll-check-notify pass.
    ///
    /// The watermark advances only after every fallible stage of the cycle
    /// has succeeded, and the duplicate-suppression message only after a
    /// successful delivery; a failed cycle retries from the same baseline.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, Error> {
        let response = self.source.fetch(self.state.from_date).await?;
        let homeworks = check_response(&response)?;
        let next_from_date = current_date(&response)?;

        // Only the newest homework entry is ever examined.
        let outcome = match homeworks.first() {
            None => {
                debug!(from_date = self.state.from_date, "no homework updates");
                CycleOutcome::NoUpdates
            }
            Some(entry) => {
                let message = render_status_change(entry)?;
                if self.state.last_message.as_deref() == Some(message.as_str()) {
                    debug!("status unchanged, suppressing duplicate notification");
                    CycleOutcome::Unchanged
                } else {
                    match self.notifier.notify(&message).await {
                        Ok(()) => {
                            info!(message = %message, "notification delivered");
                            self.state.last_message = Some(message.clone());
                            CycleOutcome::Notified(message)
                        }
                        Err(e) => {
                            // Swallowed so a broken chat cannot stall polling.
                            // last_message stays put, so the same message is
                            // sent again on the next cycle.
                            error!(error = %e, "failed to deliver notification");
                            CycleOutcome::DeliveryFailed
                        }
                    }
                }
            }
        };

        self.state.from_date = next_from_date;
        Ok(outcome)
    }

    /// Run cycles forever, `poll_interval` apart.
    ///
    /// Any cycle failure is logged and the loop keeps going; it never exits
    /// on its own.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "starting homework monitor"
        );

        loop {
            if let Err(e) = self.run_cycle().await {
                error!(error = %e, "homework check cycle failed");
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
