use thiserror::Error;

/// Failure of a client-side JSON read.
///
/// Everything but [`FetchError::Aborted`] is a genuine fetch failure. Aborted
/// means the owning scope was disposed while the request was in flight.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request aborted")]
    Aborted,
}

impl FetchError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}
