//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur while a brain processes a message.
#[derive(Debug, Clone, Error)]
pub enum BrainError {
    /// The brain could not be configured (bad URL, HTTP client setup).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The inference endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The inference endpoint did not answer in time.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The endpoint answered but the reply was an error or unusable.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}

impl BrainError {
    /// Whether this error means the backend was never reached or never answered.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}
