//! Callsign lookup via callook.info.
//!
//! callook.info serves FCC ULS license data as JSON. Lookups for unknown
//! callsigns still answer 200 with `"status": "INVALID"`, so "not found" is
//! a normal result rather than an error.

mod cache;
mod client;
mod types;

pub use cache::{CachedCallook, CallookCacheConfig};
pub use client::{CallookClient, CallookConfig};
pub use types::{Address, CallsignRecord, LicenseHolder, Location, OtherInfo, Trustee};

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::Callsign;
use crate::fetch::FetchError;

/// Anything that can resolve a callsign to a license record.
pub trait CallsignDirectory: Send + Sync {
    fn lookup<'a>(
        &'a self,
        callsign: &'a Callsign,
    ) -> BoxFuture<'a, Result<Arc<CallsignRecord>, FetchError>>;
}
