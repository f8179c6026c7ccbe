//! Delayed brain implementation - wraps another brain with artificial delay.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};
use tokio::time::sleep;

/// A brain that wraps another brain and adds artificial delay.
///
/// Useful for testing timeout handling around slow model calls.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    delay: Duration,
}

impl<B: Brain> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given brain with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a brain with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        sleep(self.delay).await;
        self.inner.process(message).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedBrain;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_brain() {
        let brain = DelayedBrain::with_millis(ScriptedBrain::replying("late"), 100);

        let start = Instant::now();
        let response = brain
            .process(InboundMessage::direct("summarizer", "test"))
            .await
            .unwrap();

        assert_eq!(response.text, "late");
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(brain.name(), "DelayedBrain");
    }
}
