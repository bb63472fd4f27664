//! Telegram delivery client for homework notifications.
//!
//! Talks to the Bot API over plain HTTPS; every failure maps to
//! [`Error::Delivery`] so the monitor can log and swallow it.

pub mod types;

use async_trait::async_trait;
use tracing::{debug, error};

use homework_bot_core::{Error, Notifier};

use types::{ApiReply, Message, SendMessage};

const API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client bound to a single chat.
pub struct TelegramBot {
    http: reqwest::Client,
    base_url: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{API_BASE}/bot{token}"),
            chat_id: chat_id.to_string(),
        }
    }

    /// Override the API base URL. Expects the `/bot<token>` prefix included.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Deliver `text` to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), Error> {
        debug!(chat_id = %self.chat_id, "sending message to Telegram chat");

        let request = SendMessage {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };

        let resp = self
            .http
            .post(format!("{}/sendMessage", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        let status = resp.status();
        let reply: ApiReply<Message> = resp
            .json()
            .await
            .map_err(|e| Error::Delivery(format!("unparseable Bot API reply: {e}")))?;

        if !reply.ok {
            let description = reply
                .description
                .unwrap_or_else(|| format!("Bot API answered HTTP {status}"));
            error!(chat_id = %self.chat_id, %description, "Telegram rejected the message");
            return Err(Error::Delivery(description));
        }

        debug!(chat_id = %self.chat_id, "message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn notify(&self, text: &str) -> Result<(), Error> {
        self.send_message(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned Bot API reply on an ephemeral port and return a
    /// base URL pointing at it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        });

        format!("http://{addr}/bot123:abc")
    }

    #[test]
    fn test_base_url_includes_token() {
        let bot = TelegramBot::new("123:abc", "42");
        assert_eq!(bot.base_url, "https://api.telegram.org/bot123:abc");
    }

    #[test]
    fn test_base_url_override() {
        let bot = TelegramBot::new("123:abc", "42").with_base_url("http://localhost:8081/bot123");
        assert_eq!(bot.base_url, "http://localhost:8081/bot123");
    }

    #[tokio::test]
    async fn test_accepted_message_is_ok() {
        let base = serve_once("200 OK", r#"{"ok": true, "result": {"message_id": 7}}"#).await;
        let bot = TelegramBot::new("123:abc", "42").with_base_url(&base);

        assert!(bot.send_message("привет").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_envelope_maps_to_delivery() {
        let base = serve_once(
            "400 Bad Request",
            r#"{"ok": false, "description": "Bad Request: chat not found"}"#,
        )
        .await;
        let bot = TelegramBot::new("123:abc", "42").with_base_url(&base);

        let err = bot.send_message("привет").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Delivery(description) if description == "Bad Request: chat not found"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_maps_to_delivery() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let bot =
            TelegramBot::new("123:abc", "42").with_base_url(&format!("http://{addr}/bot123:abc"));

        let err = bot.send_message("привет").await.unwrap_err();
        assert!(matches!(err, Error::Delivery(_)));
    }
}
