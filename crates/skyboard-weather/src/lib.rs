//! Weather data for Skyboard
//!
//! Fetches current conditions and the 5-day/3-hour forecast from
//! OpenWeatherMap and reduces the forecast to per-day summaries.

pub mod aggregate;
pub mod client;
pub mod icons;
pub mod types;

pub use aggregate::{round_temp, summarize_days, summarize_days_in, MAX_DAYS, TODAY_LABEL};
pub use client::WeatherClient;
pub use icons::icon_glyph;
pub use types::*;
