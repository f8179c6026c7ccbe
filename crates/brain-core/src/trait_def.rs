//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{InboundMessage, OutboundMessage};

/// A trait for turning an inbound message into a reply.
///
/// Implementations range from the local language-model client to scripted
/// test doubles. The trait is object-safe and is shared as `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Process an inbound message and generate a response.
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;
}
