//! serde helpers for loosely typed upstream JSON.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field.
///
/// Use together with `#[serde(default)]` so that absent and `null` fields
/// both end up at `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
