//! OpenWeatherMap 2.5 API client.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use skyboard_core::config::REQUEST_TIMEOUT_SECS;
use skyboard_core::{NetworkError, Units, WeatherError};
use tracing::instrument;

use crate::types::{
    Coordinates, CurrentConditions, ForecastSample, OwmCurrentResponse, OwmForecastResponse,
};

/// Message used when an error payload carries none.
const DEFAULT_API_MESSAGE: &str = "API Error";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    units: Units,
}

impl WeatherClient {
    /// Create a client with the standard 10 second request timeout.
    pub fn new(api_key: &str, base_url: &str, units: Units) -> Result<Self, WeatherError> {
        Self::with_timeout(
            api_key,
            base_url,
            units,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        api_key: &str,
        base_url: &str,
        units: Units,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch current conditions for a city by name.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
            ])
            .send()
            .await?;

        let body: OwmCurrentResponse = self.handle_response(response).await?;
        let description = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        Ok(CurrentConditions {
            city: if body.name.is_empty() {
                city.to_string()
            } else {
                body.name
            },
            temperature: body.main.temp,
            feels_like: body.main.feels_like,
            description,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
            coordinates: Coordinates {
                lat: body.coord.lat,
                lon: body.coord.lon,
            },
            observed_at: Utc::now(),
        })
    }

    /// Fetch the 5-day/3-hour forecast, in API order.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
            ])
            .send()
            .await?;

        let body: OwmForecastResponse = self.handle_response(response).await?;

        body.list
            .into_iter()
            .map(|item| {
                let timestamp = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
                    WeatherError::Parse(format!("Invalid forecast timestamp: {}", item.dt))
                })?;

                Ok(ForecastSample {
                    timestamp,
                    temp_max: item.main.temp_max,
                    temp_min: item.main.temp_min,
                    icon_code: item
                        .weather
                        .into_iter()
                        .next()
                        .map(|w| w.icon)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Decode a response, honouring the `cod` field OpenWeatherMap embeds in
    /// every payload.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();
        let text = response.text().await?;

        let payload: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) if status.is_success() => {
                return Err(WeatherError::Parse(format!("JSON parse error: {}", e)));
            }
            Err(_) => {
                return Err(NetworkError::ServerError {
                    status: status.as_u16(),
                    message: text,
                }
                .into());
            }
        };

        match payload_code(&payload) {
            Some(code) if code != "200" => {
                let message = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_API_MESSAGE)
                    .to_string();
                tracing::warn!("Weather API returned cod {}: {}", code, message);
                return Err(WeatherError::Api { code, message });
            }
            None if !status.is_success() => {
                return Err(NetworkError::ServerError {
                    status: status.as_u16(),
                    message: text,
                }
                .into());
            }
            _ => {}
        }

        serde_json::from_value(payload)
            .map_err(|e| WeatherError::Parse(format!("Unexpected payload shape: {}", e)))
    }
}

/// The `cod` field is a number on success and a string on most errors.
fn payload_code(payload: &Value) -> Option<String> {
    match payload.get("cod")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_code_number_and_string() {
        assert_eq!(
            payload_code(&serde_json::json!({ "cod": 200 })).as_deref(),
            Some("200")
        );
        assert_eq!(
            payload_code(&serde_json::json!({ "cod": "404" })).as_deref(),
            Some("404")
        );
        assert_eq!(payload_code(&serde_json::json!({ "list": [] })), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = WeatherClient::new("key", "http://localhost:1234/", Units::Metric).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
        assert_eq!(client.units(), Units::Metric);
    }
}
