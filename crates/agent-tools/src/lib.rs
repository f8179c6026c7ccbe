//! API adapters for the search agent.
//!
//! Each adapter answers one kind of question (crypto prices, stock quotes,
//! current weather, general web search) behind the [`Agent`] trait.
//! [`Agent::fetch`] never fails: problems come back as
//! [`AgentResult::Failure`] carrying an [`ErrorKind`] and a readable message.
//!
//! [`AgentTable`] holds exactly one adapter per [`AgentKind`].
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_tools::{AgentKind, AgentTable, AgentsConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AgentsConfig::from_env().unwrap();
//!     let table = AgentTable::from_config(&config, None).unwrap();
//!
//!     let result = table.dispatch(AgentKind::Crypto, "bitcoin").await;
//!     println!("{:?}", result); // Success("Bitcoin: $65000.12 USD")
//! }
//! ```

mod agent;
pub mod config;
mod error;
mod registry;
pub mod tools;

pub use agent::{Agent, AgentKind, AgentResult};
pub use config::{AdapterConfig, AgentsConfig, ConfigError, WebSearchConfig};
pub use error::{AgentError, ErrorKind};
pub use registry::AgentTable;
pub use tools::{CryptoPrice, SearchHit, StockQuote, Weather, WebSearch};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
