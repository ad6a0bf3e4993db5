//! Server configuration.

use std::time::Duration;

use crate::callook::{CallookCacheConfig, CallookConfig};
use crate::fetch::HttpConfig;
use crate::parks::DEFAULT_DATASET_URL;
use crate::pota::PotaConfig;

/// Default timeout for upstream HTTP requests.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default lifetime of a cached callsign record.
const DEFAULT_CALLSIGN_CACHE_TTL_SECS: u64 = 60 * 60;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub parks_csv_url: String,
    pub pota_api_url: String,
    pub callook_url: String,
    pub http_timeout: Duration,
    pub callsign_cache_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `HAM_PARKS_CSV_URL` (default `https://pota.app/all_parks_ext.csv`)
    /// - `HAM_POTA_API_URL` (default `https://api.pota.app`)
    /// - `HAM_CALLOOK_URL` (default `https://callook.info`)
    /// - `HAM_HTTP_TIMEOUT_SECS` (default 30)
    /// - `HAM_CALLSIGN_CACHE_TTL_SECS` (default 3600)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = |name: &'static str, default: &str| match lookup(name) {
            Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { name }),
            Some(v) => Ok(v.trim().to_string()),
            None => Ok(default.to_string()),
        };
        let secs = |name: &'static str, default: u64| match lookup(name) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidNumber { name, value: v }),
            None => Ok(Duration::from_secs(default)),
        };

        Ok(Self {
            parks_csv_url: url("HAM_PARKS_CSV_URL", DEFAULT_DATASET_URL)?,
            pota_api_url: url("HAM_POTA_API_URL", &PotaConfig::new().base_url)?,
            callook_url: url("HAM_CALLOOK_URL", &CallookConfig::new().base_url)?,
            http_timeout: secs("HAM_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            callsign_cache_ttl: secs(
                "HAM_CALLSIGN_CACHE_TTL_SECS",
                DEFAULT_CALLSIGN_CACHE_TTL_SECS,
            )?,
        })
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new().with_timeout(self.http_timeout.as_secs())
    }

    pub fn callook_config(&self) -> CallookConfig {
        CallookConfig::new().with_base_url(&self.callook_url)
    }

    pub fn callook_cache_config(&self) -> CallookCacheConfig {
        CallookCacheConfig {
            ttl: self.callsign_cache_ttl,
            ..Default::default()
        }
    }

    pub fn pota_config(&self) -> PotaConfig {
        PotaConfig::new().with_base_url(&self.pota_api_url)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            parks_csv_url: DEFAULT_DATASET_URL.to_string(),
            pota_api_url: PotaConfig::new().base_url,
            callook_url: CallookConfig::new().base_url,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            callsign_cache_ttl: Duration::from_secs(DEFAULT_CALLSIGN_CACHE_TTL_SECS),
        }
    }
}
