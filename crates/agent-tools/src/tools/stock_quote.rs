//! Stock quote adapter using the Alpha Vantage GLOBAL_QUOTE endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{http_client, parse_json, send};
use crate::agent::Agent;
use crate::config::{AdapterConfig, ConfigError};
use crate::error::AgentError;

const SERVICE: &str = "Alpha Vantage";

/// Longest ticker accepted (covers suffixed symbols like `BRK.B`).
const MAX_SYMBOL_LEN: usize = 10;

/// Alpha Vantage answers 200 for most failures; the body says what happened.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    /// Rate-limit notice.
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

/// Stock quote adapter.
///
/// Requires `ALPHAVANTAGE_API_KEY`. The parameter is a ticker symbol
/// (`AAPL`, `tsla`, `BRK.B`); it is uppercased before the request.
pub struct StockQuote {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl StockQuote {
    /// Create a new stock quote adapter.
    pub fn new(config: &AdapterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Validate and normalize a ticker symbol.
    fn symbol(parameter: &str) -> Result<String, AgentError> {
        let symbol = parameter.trim().to_uppercase();

        let plausible = !symbol.is_empty()
            && symbol.len() <= MAX_SYMBOL_LEN
            && symbol.starts_with(|c: char| c.is_ascii_alphabetic())
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == '.' || c == '-');

        if !plausible {
            return Err(AgentError::InvalidInput(format!(
                "'{}' doesn't look like a stock ticker - use symbols like 'AAPL' or 'TSLA'.",
                parameter.trim()
            )));
        }

        Ok(symbol)
    }

    /// Format "1.2345%" as "+1.23%".
    fn format_change(raw: &str) -> Option<String> {
        let value: f64 = raw.trim().trim_end_matches('%').parse().ok()?;
        Some(format!("{:+.2}%", value))
    }
}

#[async_trait]
impl Agent for StockQuote {
    fn name(&self) -> &str {
        "stock_quote"
    }

    fn description(&self) -> &str {
        "Latest stock price for a ticker symbol from Alpha Vantage."
    }

    async fn lookup(&self, parameter: &str) -> Result<String, AgentError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AgentError::MissingCredential(
                "Stock quotes are not configured: set ALPHAVANTAGE_API_KEY.".to_string(),
            )
        })?;
        let symbol = Self::symbol(parameter)?;
        let url = format!("{}/query", self.base_url);

        debug!("Fetching stock quote for {} from {}", symbol, url);

        let request = self.client.get(&url).query(&[
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol.as_str()),
            ("apikey", api_key),
        ]);
        let (status, body) = send(SERVICE, request).await?;

        if !status.is_success() {
            return Err(AgentError::upstream(
                SERVICE,
                format!("status {}", status.as_u16()),
            ));
        }

        let response: QuoteResponse = parse_json(SERVICE, &body)?;

        if let Some(notice) = response.note.or(response.information) {
            warn!("Alpha Vantage notice: {}", notice);
            return Err(AgentError::upstream(SERVICE, notice));
        }

        if response.error_message.is_some() {
            return Err(AgentError::NotFound(format!(
                "Stock data not available for {}.",
                symbol
            )));
        }

        let quote = response
            .global_quote
            .and_then(|q| q.price.map(|price| (price, q.change_percent)));

        let (price, change) = quote.ok_or_else(|| {
            AgentError::NotFound(format!("Stock data not available for {}.", symbol))
        })?;

        let price: f64 = price.trim().parse().map_err(|_| {
            AgentError::upstream(SERVICE, format!("unparseable price '{}'", price))
        })?;

        let mut answer = format!("{}: ${:.2} USD", symbol, price);
        if let Some(change) = change.as_deref().and_then(Self::format_change) {
            answer.push_str(&format!(" ({})", change));
        }

        Ok(answer)
    }
}
