//! Error types for orchestrator operations.

use brain_core::BrainError;
use thiserror::Error;

/// Errors that can occur while classifying a query.
///
/// None of these escape [`Router::route`](crate::Router::route); they are
/// turned into user-facing messages there.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The query was blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The local model could not be reached or failed to answer.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(#[from] BrainError),

    /// The classifier could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}
