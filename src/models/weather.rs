//! Weather reading model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system of a temperature value
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    /// Map an OpenWeatherMap `units` parameter to the unit it returns
    #[must_use]
    pub fn from_api_units(units: &str) -> Self {
        match units {
            "imperial" => TemperatureUnit::Fahrenheit,
            "metric" => TemperatureUnit::Celsius,
            _ => TemperatureUnit::Kelvin,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

/// Current conditions at the configured location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Location query the reading was requested for
    pub location: String,
    /// City name as resolved by the provider
    pub city: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    pub temperature: f64,
    pub unit: TemperatureUnit,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// When the reading was fetched
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReading {
    /// Format temperature with unit, rounded to whole degrees
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}{}", self.temperature, self.unit.symbol())
    }

    /// One-line summary, e.g. `San Jose, US: 68°F with clear sky.`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {}: {} with {}.",
            self.city,
            self.country,
            self.format_temperature(),
            self.condition
        )
    }
}
