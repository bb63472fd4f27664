//! Core poll-check-notify loop and types for the homework status bot.

pub mod config;
pub mod monitor;
pub mod response;
pub mod status;

pub use config::Credentials;
pub use monitor::{CycleOutcome, Monitor, Notifier, PollState, StatusSource};
pub use response::{check_response, current_date};
pub use status::{HomeworkStatus, render_status_change};

/// Error types for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("endpoint returned HTTP {0}")]
    Http(u16),

    #[error("request to endpoint timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected type for {0} in API response")]
    TypeMismatch(&'static str),

    #[error("missing key \"{0}\" in API response")]
    MissingKey(&'static str),

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("message delivery failed: {0}")]
    Delivery(String),
}
