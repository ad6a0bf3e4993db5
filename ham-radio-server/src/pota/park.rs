//! Per-park detail from `GET /park/{reference}`.

use serde::Deserialize;

use crate::fetch::null_as_default;

/// Park detail as served by the POTA API.
///
/// Only the descriptive fields the park dataset lacks are kept. Every
/// field tolerates `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParkDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// e.g. "State Park", "National Forest"
    #[serde(deserialize_with = "null_as_default")]
    pub parktype_desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entity_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub park_comments: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_methods: String,
    #[serde(deserialize_with = "null_as_default")]
    pub activation_methods: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grid4: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grid6: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_activator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_activation_date: String,
}
