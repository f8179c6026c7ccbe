//! Brain implementation for a locally hosted language model.
//!
//! Talks to any server exposing the OpenAI chat-completions route
//! (`POST /v1/chat/completions`), such as LM Studio on its default port.
//! The brain is stateless: every call sends the system prompt and the one
//! user message, nothing else.
//!
//! # Usage
//!
//! ```rust,no_run
//! use local_brain::{Brain, InboundMessage, LocalBrain, LocalBrainConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LocalBrainConfig::builder()
//!         .system_prompt("Answer in one word.")
//!         .temperature(0.1)
//!         .build();
//!     let brain = LocalBrain::new(config)?;
//!
//!     let reply = brain.process(InboundMessage::direct("demo", "Capital of Japan?")).await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::LocalBrain;
pub use config::{LocalBrainConfig, LocalBrainConfigBuilder, DEFAULT_LOCAL_LLM_URL};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};
