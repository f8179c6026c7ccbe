//! Weather adapter using the OpenWeather current-weather API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{capitalize, http_client, parse_json, send};
use crate::agent::Agent;
use crate::config::{AdapterConfig, ConfigError};
use crate::error::AgentError;

const SERVICE: &str = "OpenWeather";

const MAX_LOCATION_LEN: usize = 100;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    main: Option<MainReading>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherError {
    message: String,
}

/// Weather adapter.
///
/// Requires `OPENWEATHER_API_KEY`. The parameter is a place name
/// ("Tokyo", "Paris,FR"); temperatures are metric.
pub struct Weather {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Weather {
    /// Create a new weather adapter.
    pub fn new(config: &AdapterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn location(parameter: &str) -> Result<&str, AgentError> {
        let location = parameter.trim();
        if location.is_empty() {
            return Err(AgentError::InvalidInput(
                "Please name a place to get the weather for.".to_string(),
            ));
        }
        if location.chars().count() > MAX_LOCATION_LEN {
            return Err(AgentError::InvalidInput(
                "That location name is too long.".to_string(),
            ));
        }
        Ok(location)
    }

    /// One decimal at most; whole degrees print without a fraction.
    fn format_temp(temp: f64) -> String {
        let rounded = (temp * 10.0).round() / 10.0;
        format!("{}", rounded)
    }
}

#[async_trait]
impl Agent for Weather {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Current conditions and temperature for a city from OpenWeather."
    }

    async fn lookup(&self, parameter: &str) -> Result<String, AgentError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AgentError::MissingCredential(
                "Weather is not configured: set OPENWEATHER_API_KEY.".to_string(),
            )
        })?;
        let location = Self::location(parameter)?;
        let url = format!("{}/weather", self.base_url);

        debug!("Fetching weather for '{}' from {}", location, url);

        let request = self.client.get(&url).query(&[
            ("q", location),
            ("appid", api_key),
            ("units", "metric"),
        ]);
        let (status, body) = send(SERVICE, request).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(AgentError::NotFound(format!(
                "Location not found: {}",
                location
            )));
        }

        if !status.is_success() {
            let detail = serde_json::from_str::<OpenWeatherError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenWeather returned {}: {}", status, detail);
            return Err(AgentError::upstream(
                SERVICE,
                format!("status {}: {}", status.as_u16(), detail),
            ));
        }

        let data: WeatherResponse = parse_json(SERVICE, &body)?;

        let temp = data.main.and_then(|m| m.temp);
        let condition = data.weather.into_iter().next().and_then(|c| {
            c.description
                .filter(|d| !d.trim().is_empty())
                .or(c.main)
        });

        let (temp, condition) = match (temp, condition) {
            (Some(temp), Some(condition)) => (temp, condition),
            _ => {
                return Err(AgentError::upstream(
                    SERVICE,
                    "incomplete weather data received",
                ))
            }
        };

        let city = data
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| location.to_string());

        Ok(format!(
            "{}: {}°C, {}",
            city,
            Self::format_temp(temp),
            capitalize(condition.trim())
        ))
    }
}
