//! OpenWeatherMap current-weather client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{ProviderError, WeatherProvider, http};
use crate::config::WeatherConfig;
use crate::models::{TemperatureUnit, WeatherReading};

pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    units: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainData,
    weather: Vec<Condition>,
    sys: SysData,
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysData {
    country: Option<String>,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
        }
    }

    /// `/weather` for `location` in the configured unit system
    fn request_url(&self, location: &str, api_key: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units={}",
            self.base_url,
            urlencoding::encode(location),
            urlencoding::encode(api_key),
            self.units
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, location: &str) -> Result<WeatherReading, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = self.request_url(location, api_key);
        let body = http::get_text(&self.client, "openweathermap", &url).await?;
        let reading = parse_current_weather(
            &body,
            location,
            TemperatureUnit::from_api_units(&self.units),
            Utc::now(),
        )?;

        info!("Current weather: {}", reading.summary());
        Ok(reading)
    }
}

/// Parse a `/weather` response body
pub fn parse_current_weather(
    body: &str,
    location: &str,
    unit: TemperatureUnit,
    fetched_at: DateTime<Utc>,
) -> Result<WeatherReading, ProviderError> {
    let response: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(ProviderError::malformed)?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::malformed("no weather conditions in response"))?;

    Ok(WeatherReading {
        location: location.to_string(),
        city: response.name,
        country: response.sys.country.unwrap_or_default(),
        temperature: response.main.temp,
        unit,
        condition: condition.description,
        fetched_at,
    })
}
