//! Thin wrapper around `reqwest::Client`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::FetchError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an error body to keep in error messages.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds, covering connect through body read
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl HttpConfig {
    pub fn new() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client shared by all upstream feeds. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// GET `url` and return the whole body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body.chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        let body = response.bytes().await?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let body = self.get_bytes(url).await?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(
                String::from_utf8_lossy(&body)
                    .chars()
                    .take(BODY_EXCERPT_CHARS)
                    .collect(),
            ),
        })
    }
}
