//! HTTP client for the homework-statuses endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use homework_bot_core::{Error, StatusSource};

/// Fixed endpoint for homework status queries.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Practicum homework-review API.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(token: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: token.to_string(),
        })
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(self)
    }

    /// Fetch homework entries updated since `from_date`.
    ///
    /// A non-200 answer, a timeout, and an unparseable body are all
    /// distinct cycle-recoverable errors; none of them may crash the
    /// process.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value, Error> {
        debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header("Authorization", oauth_header(&self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            error!(status = %status, "endpoint is unavailable");
            return Err(Error::Http(status.as_u16()));
        }

        resp.json().await.map_err(|e| {
            error!(error = %e, "endpoint returned an unparseable body");
            Error::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, Error> {
        self.homework_statuses(from_date).await
    }
}

/// Map a reqwest failure onto the cycle-recoverable error taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        error!(error = %err, "connection to endpoint failed");
        Error::Transport(err.to_string())
    }
}

/// `Authorization` header value for the Practicum API.
fn oauth_header(token: &str) -> String {
    format!("OAuth {token}")
}
