use popdash_core::error::CoreError;

/// Error type for a single dashboard refresh.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request failed or the body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {0}")]
    HttpStatus(u16),

    /// The rows could not be regrouped or drawn.
    #[error(transparent)]
    Core(#[from] CoreError),
}
