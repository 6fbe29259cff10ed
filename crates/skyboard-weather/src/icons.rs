//! OpenWeatherMap icon codes mapped to glyphs for the text display.
//! See: https://openweathermap.org/weather-conditions

/// Glyph shown when the icon code is unknown or missing.
pub const FALLBACK_GLYPH: &str = "🌤️";

/// Convert an OpenWeatherMap icon code ("01d", "10n", ...) to a display glyph.
pub fn icon_glyph(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => FALLBACK_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_and_night_clear_differ() {
        assert_eq!(icon_glyph("01d"), "☀️");
        assert_eq!(icon_glyph("01n"), "🌙");
    }

    #[test]
    fn test_rain_variants() {
        assert_eq!(icon_glyph("10d"), "🌦️");
        assert_eq!(icon_glyph("10n"), "🌧️");
        assert_eq!(icon_glyph("09d"), "🌧️");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(icon_glyph(""), FALLBACK_GLYPH);
        assert_eq!(icon_glyph("99x"), FALLBACK_GLYPH);
    }
}
