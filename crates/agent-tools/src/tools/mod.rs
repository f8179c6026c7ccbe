//! Built-in adapters.

mod crypto_price;
mod stock_quote;
mod weather;
mod web_search;

pub use crypto_price::CryptoPrice;
pub use stock_quote::StockQuote;
pub use weather::Weather;
pub use web_search::{SearchHit, WebSearch, NO_RESULTS_MESSAGE};

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ConfigError;
use crate::error::AgentError;

const USER_AGENT: &str = concat!("search-agents/", env!("CARGO_PKG_VERSION"));

/// One client per adapter, bounded by the adapter's timeout.
fn http_client(timeout: Duration) -> Result<reqwest::Client, ConfigError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Send a prepared request and read the whole body.
///
/// The client timeout covers the body read as well, so a stalled body also
/// surfaces as a timeout.
async fn send(
    service: &str,
    request: reqwest::RequestBuilder,
) -> Result<(StatusCode, String), AgentError> {
    let response = request
        .send()
        .await
        .map_err(|e| AgentError::transport(service, e))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AgentError::transport(service, e))?;
    Ok((status, body))
}

fn parse_json<T: DeserializeOwned>(service: &str, body: &str) -> Result<T, AgentError> {
    serde_json::from_str(body)
        .map_err(|e| AgentError::upstream(service, format!("malformed response: {}", e)))
}

/// Capitalize the first character ("bitcoin" -> "Bitcoin").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
