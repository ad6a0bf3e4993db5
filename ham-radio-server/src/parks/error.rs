//! Park cache error types.

use crate::fetch::FetchError;

/// Errors refreshing the park reference table.
#[derive(Debug, thiserror::Error)]
pub enum ParkError {
    /// The dataset could not be downloaded
    #[error("failed to fetch park dataset: {0}")]
    Fetch(#[from] FetchError),

    /// The dataset was downloaded but is not a usable CSV table
    #[error("failed to parse park dataset: {message}")]
    Parse { message: String },

    /// A refresh this caller waited on failed; carries that failure's message
    #[error("park dataset refresh failed: {message}")]
    RefreshFailed { message: String },
}
