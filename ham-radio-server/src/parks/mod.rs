//! Park reference lookup.
//!
//! The full POTA park list is published as one CSV file of roughly 80k
//! rows. Rather than query the park API per lookup, we download the whole
//! file, index it by reference code and serve lookups from memory.
//!
//! Key characteristics:
//! - The table is rebuilt from scratch on every refresh and swapped in
//!   whole; readers never see a half-built table
//! - Refreshes happen lazily on lookup once the table is older than 24 hours
//! - Concurrent refreshes are collapsed into one fetch
//! - Malformed rows are skipped; a malformed file fails the refresh

mod cache;
mod error;
mod parse;
mod source;
mod table;

pub use cache::{CacheState, Clock, DEFAULT_TTL, ReferenceCache, SystemClock};
pub use error::ParkError;
pub use parse::{parse_dataset, parse_flag};
pub use source::{DEFAULT_DATASET_URL, DatasetSource, HttpDatasetSource};
pub use table::{ParkReference, ReferenceTable};
