//! Credentials loaded from the environment.

use std::env;

/// Environment variable holding the Practicum OAuth token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACT_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TG_TOKEN";
/// Environment variable holding the target chat identifier.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TG_CHAT_ID";

/// The three secrets the bot cannot run without.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Read credentials from the environment.
    ///
    /// A missing variable becomes an empty string so [`is_complete`] can
    /// report it; no other validation happens here.
    ///
    /// [`is_complete`]: Credentials::is_complete
    pub fn from_env() -> Self {
        Self {
            practicum_token: env::var(PRACTICUM_TOKEN_VAR).unwrap_or_default(),
            telegram_token: env::var(TELEGRAM_TOKEN_VAR).unwrap_or_default(),
            chat_id: env::var(TELEGRAM_CHAT_ID_VAR).unwrap_or_default(),
        }
    }

    /// True iff every credential is present and non-empty. No network
    /// activity may start otherwise.
    pub fn is_complete(&self) -> bool {
        !self.practicum_token.is_empty()
            && !self.telegram_token.is_empty()
            && !self.chat_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(practicum: &str, telegram: &str, chat: &str) -> Credentials {
        Credentials {
            practicum_token: practicum.into(),
            telegram_token: telegram.into(),
            chat_id: chat.into(),
        }
    }

    #[test]
    fn test_complete_triple() {
        assert!(creds("practicum-token", "tg-token", "12345").is_complete());
    }

    #[test]
    fn test_missing_practicum_token() {
        assert!(!creds("", "tg-token", "12345").is_complete());
    }

    #[test]
    fn test_missing_telegram_token() {
        assert!(!creds("practicum-token", "", "12345").is_complete());
    }

    #[test]
    fn test_missing_chat_id() {
        assert!(!creds("practicum-token", "tg-token", "").is_complete());
    }

    #[test]
    fn test_all_missing() {
        assert!(!creds("", "", "").is_complete());
    }
}
