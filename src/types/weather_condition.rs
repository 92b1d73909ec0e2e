//! Defines the `WeatherCondition` enum, mapping the free-text weather descriptions reported
//! by observation feeds to descriptive variants and map icons.

use serde::Serialize;
use std::fmt;

/// Icon used for weather text that has no known [`WeatherCondition`].
pub const DEFAULT_WEATHER_ICON: &str = "🌤️";

/// Represents a recognised weather condition.
///
/// Observation feeds report conditions as free text (e.g. `"Partly Cloudy"`). Text is
/// normalised (trimmed, lower-cased) before matching, and only exact matches are
/// recognised; anything else maps to `None` and renders with [`DEFAULT_WEATHER_ICON`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Sunny,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Rain,
    Showers,
    Thunderstorm,
    Snow,
    Fog,
    Haze,
}

impl WeatherCondition {
    /// Normalises raw weather text the way it is stored on an [`crate::Observation`].
    ///
    /// Returns `None` for text that is empty after trimming.
    pub fn normalize(text: &str) -> Option<String> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    /// Attempts to convert weather text into a `WeatherCondition` variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hyperlocal_weather::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::from_text("  Partly Cloudy "), Some(WeatherCondition::PartlyCloudy));
    /// assert_eq!(WeatherCondition::from_text("Mostly Sunny"), None);
    /// ```
    pub fn from_text(text: &str) -> Option<Self> {
        match Self::normalize(text)?.as_str() {
            "clear" => Some(WeatherCondition::Clear),
            "sunny" => Some(WeatherCondition::Sunny),
            "partly cloudy" => Some(WeatherCondition::PartlyCloudy),
            "cloudy" => Some(WeatherCondition::Cloudy),
            "overcast" => Some(WeatherCondition::Overcast),
            "rain" => Some(WeatherCondition::Rain),
            "showers" => Some(WeatherCondition::Showers),
            "thunderstorm" => Some(WeatherCondition::Thunderstorm),
            "snow" => Some(WeatherCondition::Snow),
            "fog" => Some(WeatherCondition::Fog),
            "haze" => Some(WeatherCondition::Haze),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Clear | WeatherCondition::Sunny => "☀️",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Cloudy | WeatherCondition::Overcast => "☁️",
            WeatherCondition::Rain => "🌧️",
            WeatherCondition::Showers => "🌦️",
            WeatherCondition::Thunderstorm => "⛈️",
            WeatherCondition::Snow => "❄️",
            WeatherCondition::Fog | WeatherCondition::Haze => "🌫️",
        }
    }

    /// Icon for optional weather text, falling back to [`DEFAULT_WEATHER_ICON`].
    pub fn icon_for(text: Option<&str>) -> &'static str {
        text.and_then(Self::from_text)
            .map_or(DEFAULT_WEATHER_ICON, |condition| condition.icon())
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Showers => "Showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Haze => "Haze",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_normalizes_case_and_whitespace() {
        assert_eq!(
            WeatherCondition::from_text("THUNDERSTORM\n"),
            Some(WeatherCondition::Thunderstorm)
        );
        assert_eq!(WeatherCondition::from_text("haze"), Some(WeatherCondition::Haze));
        assert_eq!(WeatherCondition::from_text("   "), None);
    }

    #[test]
    fn test_icon_for_unknown_text_uses_default() {
        assert_eq!(WeatherCondition::icon_for(Some("Light Drizzle")), DEFAULT_WEATHER_ICON);
        assert_eq!(WeatherCondition::icon_for(None), DEFAULT_WEATHER_ICON);
        assert_eq!(WeatherCondition::icon_for(Some("Snow")), "❄️");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            WeatherCondition::normalize(" Partly Cloudy "),
            Some("partly cloudy".to_string())
        );
        assert_eq!(WeatherCondition::normalize(""), None);
    }
}
