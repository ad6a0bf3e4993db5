//! callook.info HTTP client.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::Callsign;
use crate::fetch::{FetchError, HttpClient};

use super::CallsignDirectory;
use super::types::CallsignRecord;

/// Default base URL for callook.info.
const DEFAULT_BASE_URL: &str = "https://callook.info";

/// Configuration for the callook client.
#[derive(Debug, Clone)]
pub struct CallookConfig {
    /// Base URL for the API
    pub base_url: String,
}

impl CallookConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for CallookConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the callook.info JSON API.
#[derive(Debug, Clone)]
pub struct CallookClient {
    http: HttpClient,
    base_url: String,
}

impl CallookClient {
    pub fn new(http: HttpClient, config: CallookConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, callsign: &Callsign) -> String {
        format!("{}/{}/json", self.base_url, callsign.as_str())
    }

    /// Fetch the license record for a callsign.
    ///
    /// Unknown callsigns come back as a record whose `status` is not
    /// `VALID`, not as an error.
    pub async fn fetch(&self, callsign: &Callsign) -> Result<CallsignRecord, FetchError> {
        self.http.get_json(&self.url_for(callsign)).await
    }
}

impl CallsignDirectory for CallookClient {
    fn lookup<'a>(
        &'a self,
        callsign: &'a Callsign,
    ) -> BoxFuture<'a, Result<Arc<CallsignRecord>, FetchError>> {
        async move { self.fetch(callsign).await.map(Arc::new) }.boxed()
    }
}
