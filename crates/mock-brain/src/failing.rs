//! Failing brain - every call returns the same error.

use std::sync::atomic::{AtomicUsize, Ordering};

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

/// A brain that always fails, for exercising fallback paths.
#[derive(Debug)]
pub struct FailingBrain {
    error: BrainError,
    calls: AtomicUsize,
}

impl FailingBrain {
    /// Fail every call with `error`.
    pub fn new(error: BrainError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Behave like an inference server that is not running.
    pub fn unreachable() -> Self {
        Self::new(BrainError::Network("connection refused".to_string()))
    }

    /// Behave like an inference server that never answers.
    pub fn timing_out() -> Self {
        Self::new(BrainError::Timeout("request timed out".to_string()))
    }

    /// Number of calls attempted.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn process(&self, _message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails_and_counts() {
        let brain = FailingBrain::unreachable();
        for _ in 0..2 {
            let err = brain
                .process(InboundMessage::direct("classifier", "q"))
                .await
                .unwrap_err();
            assert!(err.is_unreachable());
        }
        assert_eq!(brain.call_count(), 2);
    }

    #[tokio::test]
    async fn test_custom_error() {
        let brain = FailingBrain::new(BrainError::ProcessingFailed("bad gateway".into()));
        let err = brain.process(InboundMessage::direct("t", "q")).await.unwrap_err();
        assert!(!err.is_unreachable());
        assert!(err.to_string().contains("bad gateway"));
    }
}
