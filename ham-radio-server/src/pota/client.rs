//! POTA API client: activator spots and park details.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::fetch::{FetchError, HttpClient};

use super::park::ParkDetails;
use super::spots::Spot;
use super::{ParkDetailSource, SpotSource};
use crate::domain::ParkRef;

/// Default base URL for the POTA API.
const DEFAULT_BASE_URL: &str = "https://api.pota.app";

/// Configuration for the POTA API client.
#[derive(Debug, Clone)]
pub struct PotaConfig {
    /// Base URL for the API
    pub base_url: String,
}

impl PotaConfig {
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

impl Default for PotaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the POTA REST API.
#[derive(Debug, Clone)]
pub struct PotaClient {
    http: HttpClient,
    base_url: String,
}

impl PotaClient {
    pub fn new(http: HttpClient, config: PotaConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn spots_url(&self) -> String {
        format!("{}/spot/activator", self.base_url)
    }

    fn park_url(&self, reference: &ParkRef) -> String {
        format!("{}/park/{}", self.base_url, reference)
    }

    /// Fetch every current activator spot.
    pub async fn fetch_spots(&self) -> Result<Vec<Spot>, FetchError> {
        self.http.get_json(&self.spots_url()).await
    }

    /// Fetch the detail record for one park.
    pub async fn fetch_park(&self, reference: &ParkRef) -> Result<ParkDetails, FetchError> {
        self.http.get_json(&self.park_url(reference)).await
    }
}

impl SpotSource for PotaClient {
    fn current_spots(&self) -> BoxFuture<'_, Result<Vec<Spot>, FetchError>> {
        self.fetch_spots().boxed()
    }
}

impl ParkDetailSource for PotaClient {
    fn park_details<'a>(
        &'a self,
        reference: &'a ParkRef,
    ) -> BoxFuture<'a, Result<ParkDetails, FetchError>> {
        self.fetch_park(reference).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::HttpConfig;

    #[test]
    fn urls_from_base() {
        let http = HttpClient::new(&HttpConfig::default()).unwrap();
        let park = ParkRef::parse("US-2312").unwrap();

        let client = PotaClient::new(http.clone(), PotaConfig::new());
        assert_eq!(client.spots_url(), "https://api.pota.app/spot/activator");
        assert_eq!(client.park_url(&park), "https://api.pota.app/park/US-2312");

        let client = PotaClient::new(http, PotaConfig::new().with_base_url("http://localhost:9000/"));
        assert_eq!(client.spots_url(), "http://localhost:9000/spot/activator");
        assert_eq!(client.park_url(&park), "http://localhost:9000/park/US-2312");
    }
}
