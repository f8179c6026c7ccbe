//! Core trait and types for brain implementations.
//!
//! A "brain" is anything that turns a piece of text into a reply: the local
//! language model that classifies queries and summarizes search results, or
//! a scripted test double. This crate defines:
//!
//! - [`Brain`] - The trait every backend implements
//! - [`InboundMessage`] / [`OutboundMessage`] - Message types for input/output
//! - [`BrainError`] - Error types for brain operations
//! - [`prompt_fingerprint`] - Stable identifier for a system prompt
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, InboundMessage, OutboundMessage};
//! use async_trait::async_trait;
//!
//! struct ShoutBrain;
//!
//! #[async_trait]
//! impl Brain for ShoutBrain {
//!     async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
//!         Ok(OutboundMessage::reply_to(&message, message.text.to_uppercase()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "ShoutBrain"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use message::{InboundMessage, OutboundMessage};
pub use prompt::prompt_fingerprint;
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
