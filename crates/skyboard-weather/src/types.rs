use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates as reported by the current-weather endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name as resolved by the API
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    /// Relative humidity, percent
    pub humidity: u8,
    pub wind_speed: f64,
    pub coordinates: Coordinates,
    pub observed_at: DateTime<Utc>,
}

/// One 3-hour forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temp_max: f64,
    pub temp_min: f64,
    /// OpenWeatherMap icon code, e.g. "10d"
    pub icon_code: String,
}

/// Aggregated forecast for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// "Today" for the first day, otherwise the short weekday name
    pub label: String,
    pub icon_code: String,
    pub high: i32,
    pub low: i32,
}

// Wire format of the OpenWeatherMap 2.5 endpoints.

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentResponse {
    #[serde(default)]
    pub name: String,
    pub coord: OwmCoord,
    pub main: OwmCurrentMain,
    pub wind: OwmWind,
    pub weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmWeather {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastResponse {
    pub list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastItem {
    pub dt: i64,
    pub main: OwmForecastMain,
    pub weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastMain {
    pub temp_max: f64,
    pub temp_min: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_payload_deserializes() {
        let json = serde_json::json!({
            "cod": 200,
            "name": "London",
            "coord": { "lat": 51.51, "lon": -0.13 },
            "main": { "temp": 11.3, "feels_like": 10.1, "humidity": 81, "pressure": 1012 },
            "wind": { "speed": 4.6, "deg": 240 },
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]
        });

        let parsed: OwmCurrentResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.name, "London");
        assert_eq!(parsed.main.humidity, 81);
        assert_eq!(parsed.weather[0].description, "light rain");
    }

    #[test]
    fn test_forecast_item_ignores_extra_fields() {
        let json = serde_json::json!({
            "dt": 1_700_000_000,
            "main": { "temp": 8.0, "temp_max": 9.5, "temp_min": 6.25 },
            "weather": [{ "icon": "04n" }],
            "dt_txt": "2023-11-14 22:00:00"
        });

        let item: OwmForecastItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.dt, 1_700_000_000);
        assert_eq!(item.main.temp_min, 6.25);
        assert_eq!(item.weather[0].icon, "04n");
    }
}
