//! callook.info JSON response types.
//!
//! Every field defaults when absent or `null`: INVALID responses carry
//! little more than `status`, with everything else set to `null`.

use serde::Deserialize;

use crate::domain::{Coordinate, ValidationError};
use crate::fetch::null_as_default;

/// Response from `GET /{callsign}/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallsignRecord {
    /// `VALID`, `INVALID` or `UPDATING`
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// `PERSON` or `CLUB`
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub license_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current: LicenseHolder,
    #[serde(deserialize_with = "null_as_default")]
    pub previous: LicenseHolder,
    #[serde(deserialize_with = "null_as_default")]
    pub trustee: Trustee,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: Address,
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(rename = "otherInfo", deserialize_with = "null_as_default")]
    pub other_info: OtherInfo,
}

impl CallsignRecord {
    pub fn is_valid(&self) -> bool {
        self.status == "VALID"
    }

    /// The licensee's location as a coordinate.
    pub fn coordinate(&self) -> Result<Coordinate, ValidationError> {
        Coordinate::parse(&self.location.latitude, &self.location.longitude)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseHolder {
    #[serde(deserialize_with = "null_as_default")]
    pub callsign: String,
    #[serde(deserialize_with = "null_as_default")]
    pub oper_class: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Trustee {
    #[serde(deserialize_with = "null_as_default")]
    pub callsign: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub line1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub line2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attn: String,
}

/// Location as published: decimal degrees, but as strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gridsquare: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub grant_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expiry_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_action_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub frn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uls_url: String,
}
