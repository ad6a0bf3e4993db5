//! Where the park dataset comes from.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::fetch::{FetchError, HttpClient};

/// Default location of the full park list.
pub const DEFAULT_DATASET_URL: &str = "https://pota.app/all_parks_ext.csv";

/// Provider of the raw park dataset bytes.
///
/// Production code uses [`HttpDatasetSource`]; tests substitute canned
/// payloads.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>, FetchError>>;
}

/// Downloads the dataset over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    http: HttpClient,
    url: String,
}

impl HttpDatasetSource {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DatasetSource for HttpDatasetSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>, FetchError>> {
        self.http.get_bytes(&self.url).boxed()
    }
}
