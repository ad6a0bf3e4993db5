//! Parks on the Air REST API: live activator spots and per-park detail.
//!
//! The spot API returns every current spot in one JSON array with no
//! server-side filtering, so filters are applied here.

mod client;
mod park;
mod spots;

pub use client::{PotaClient, PotaConfig};
pub use park::ParkDetails;
pub use spots::{Spot, SpotFilter};

use futures::future::BoxFuture;

use crate::domain::ParkRef;
use crate::fetch::FetchError;

/// Anything that can list current activator spots.
pub trait SpotSource: Send + Sync {
    fn current_spots(&self) -> BoxFuture<'_, Result<Vec<Spot>, FetchError>>;
}

/// Anything that can fetch descriptive detail for a park.
pub trait ParkDetailSource: Send + Sync {
    fn park_details<'a>(
        &'a self,
        reference: &'a ParkRef,
    ) -> BoxFuture<'a, Result<ParkDetails, FetchError>>;
}
