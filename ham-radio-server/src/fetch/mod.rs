//! Shared HTTP plumbing for the upstream feeds.
//!
//! Every upstream (the park dataset, callook.info, the POTA spot API) is a
//! plain GET returning either bytes or JSON. [`HttpClient`] owns the one
//! `reqwest::Client` they share and maps HTTP statuses onto [`FetchError`].

mod client;
mod error;
mod json;

pub use client::{HttpClient, HttpConfig};
pub use error::FetchError;
pub use json::null_as_default;
