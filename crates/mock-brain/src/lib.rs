//! Mock brain implementations for tests.
//!
//! This crate provides stand-ins for the local language model:
//! - `ScriptedBrain` - Replies with canned text and records what it was sent
//! - `FailingBrain` - Always fails with a chosen error
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For the real backend, use the `local-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, InboundMessage, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::replying("[crypto_asset] bitcoin");
//!
//!     let reply = brain.process(InboundMessage::direct("classifier", "btc?")).await?;
//!     assert_eq!(reply.text, "[crypto_asset] bitcoin");
//!     assert_eq!(brain.call_count(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

pub use delayed::DelayedBrain;
pub use failing::FailingBrain;
pub use scripted::ScriptedBrain;
