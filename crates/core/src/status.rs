//! Homework status codes and verdict rendering.

use serde_json::Value;
use tracing::error;

use crate::Error;

/// Review status of a homework submission.
///
/// Closed set; any other code coming from the API is an error, not
/// something to ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse a status code from the API.
    pub fn from_code(code: &str) -> Result<Self, Error> {
        match code {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => {
                error!(status = %other, "unhandled homework status");
                Err(Error::UnknownStatus(other.to_string()))
            }
        }
    }

    /// Human-readable verdict sentence for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the notification text for a homework entry.
///
/// `homework_name` and `status` are both required strings; a missing name
/// fails the cycle instead of being skipped over, and a present but
/// non-string value is a shape error, not a missing key.
pub fn render_status_change(entry: &Value) -> Result<String, Error> {
    let name = required_str(entry, "homework_name")?;
    let code = required_str(entry, "status")?;

    let verdict = HomeworkStatus::from_code(code)?.verdict();
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}

fn required_str<'a>(entry: &'a Value, key: &'static str) -> Result<&'a str, Error> {
    let Some(value) = entry.get(key) else {
        error!("homework entry has no \"{key}\"");
        return Err(Error::MissingKey(key));
    };
    value.as_str().ok_or_else(|| {
        error!("\"{key}\" in homework entry is not a string");
        Error::TypeMismatch(key)
    })
}
