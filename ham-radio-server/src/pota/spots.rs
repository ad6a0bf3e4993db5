//! POTA spot JSON types and filtering.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::fetch::null_as_default;

/// Spot timestamp format used by the API (UTC, no offset).
const SPOT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One activator spot from `GET /spot/activator`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spot {
    #[serde(deserialize_with = "null_as_default")]
    pub spot_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub activator: String,
    /// Frequency in kHz, as sent by the spotter
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    /// Park name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location_desc: String,
    /// UTC, `YYYY-MM-DDTHH:MM:SS`
    #[serde(deserialize_with = "null_as_default")]
    pub spot_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spotter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,
    pub grid4: Option<String>,
    pub grid6: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Spot {
    /// Parsed spot time, if the API sent something we understand.
    pub fn spotted_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.spot_time, SPOT_TIME_FORMAT).ok()
    }
}

/// Optional activator and mode filters, both case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotFilter {
    pub activator: Option<String>,
    pub mode: Option<String>,
}

impl SpotFilter {
    /// Build a filter, treating empty or whitespace-only values as unset.
    pub fn new(activator: Option<&str>, mode: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            activator: clean(activator),
            mode: clean(mode),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activator.is_none() && self.mode.is_none()
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        let activator_ok = self
            .activator
            .as_deref()
            .is_none_or(|a| spot.activator.eq_ignore_ascii_case(a));
        let mode_ok = self
            .mode
            .as_deref()
            .is_none_or(|m| spot.mode.eq_ignore_ascii_case(m));
        activator_ok && mode_ok
    }

    /// Keep only spots matching every set filter, preserving order.
    pub fn apply(&self, spots: Vec<Spot>) -> Vec<Spot> {
        if self.is_empty() {
            return spots;
        }
        spots.into_iter().filter(|s| self.matches(s)).collect()
    }
}
