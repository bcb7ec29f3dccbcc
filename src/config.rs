//! Configuration management for the daily digest
//!
//! Settings come from serde defaults, an optional TOML file and environment
//! variables, in that order. The conventional API key variables
//! (`OPENWEATHER_API_KEY`, `NEWS_API_KEY`, `ALPHA_VANTAGE_API_KEY`) win over
//! everything else. The resulting [`DigestConfig`] is passed explicitly to
//! every provider client.

use crate::DigestError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "DIGEST_CONFIG";
/// Config file looked up in the working directory when `DIGEST_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "digest.toml";

const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";
const NEWS_KEY_ENV: &str = "NEWS_API_KEY";
const STOCKS_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Root configuration structure for a digest run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// OpenWeatherMap settings
    pub weather: WeatherConfig,
    /// NewsAPI settings
    pub news: NewsConfig,
    /// Alpha Vantage settings
    pub stocks: StocksConfig,
    /// Numbers API settings
    pub trivia: TriviaConfig,
    /// Shared HTTP client settings
    pub http: HttpConfig,
    /// Where the rendered digest goes
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Location query, e.g. `San Jose,US`
    #[serde(default = "default_weather_location")]
    pub location: String,
    /// Unit system passed to the API (`imperial`, `metric` or `standard`)
    #[serde(default = "default_weather_units")]
    pub units: String,
}

/// News provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// NewsAPI key
    pub api_key: Option<String>,
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// Search term for top headlines
    #[serde(default = "default_news_topic")]
    pub topic: String,
    /// Number of headlines to request
    #[serde(default = "default_news_page_size")]
    pub page_size: u32,
}

/// Stock quote provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StocksConfig {
    /// Alpha Vantage API key
    pub api_key: Option<String>,
    #[serde(default = "default_stocks_base_url")]
    pub base_url: String,
    /// Tracked symbols, fetched in this order
    #[serde(default = "default_stocks_symbols")]
    pub symbols: Vec<String>,
    /// Pause between two quote requests in seconds
    #[serde(default = "default_stocks_delay")]
    pub delay_seconds: u64,
}

/// Trivia provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    #[serde(default = "default_trivia_base_url")]
    pub base_url: String,
}

/// HTTP client settings shared by all providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_http_user_agent")]
    pub user_agent: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated HTML file, overwritten on every run
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_location() -> String {
    "San Jose,US".to_string()
}

fn default_weather_units() -> String {
    "imperial".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_topic() -> String {
    "technology".to_string()
}

fn default_news_page_size() -> u32 {
    3
}

fn default_stocks_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}

fn default_stocks_symbols() -> Vec<String> {
    vec!["AAPL".to_string(), "GOOGL".to_string()]
}

fn default_stocks_delay() -> u64 {
    13
}

fn default_trivia_base_url() -> String {
    "http://numbersapi.com".to_string()
}

fn default_http_timeout() -> u64 {
    15
}

fn default_http_user_agent() -> String {
    format!("daily-digest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_path() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            location: default_weather_location(),
            units: default_weather_units(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_news_base_url(),
            topic: default_news_topic(),
            page_size: default_news_page_size(),
        }
    }
}

impl Default for StocksConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_stocks_base_url(),
            symbols: default_stocks_symbols(),
            delay_seconds: default_stocks_delay(),
        }
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: default_trivia_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_http_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl StocksConfig {
    /// Pause enforced between two quote requests
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl DigestConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // A path the caller named must exist; the default file is optional
        let (config_file, required) = match config_path {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        builder = builder.add_source(
            File::from(config_file)
                .required(required)
                .format(config::FileFormat::Toml),
        );

        // DIGEST_STOCKS__DELAY_SECONDS=13 -> stocks.delay_seconds
        builder = builder.add_source(
            Environment::with_prefix("DIGEST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("stocks.symbols"),
        );

        builder = builder
            .set_override_option("weather.api_key", env::var(WEATHER_KEY_ENV).ok())
            .and_then(|b| b.set_override_option("news.api_key", env::var(NEWS_KEY_ENV).ok()))
            .and_then(|b| b.set_override_option("stocks.api_key", env::var(STOCKS_KEY_ENV).ok()))
            .with_context(|| "Failed to apply API key overrides")?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DigestConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        for key in [
            &mut self.weather.api_key,
            &mut self.news.api_key,
            &mut self.stocks.api_key,
        ] {
            if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                *key = None;
            }
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.news.base_url.is_empty() {
            self.news.base_url = default_news_base_url();
        }
        if self.news.page_size == 0 {
            self.news.page_size = default_news_page_size();
        }
        if self.stocks.base_url.is_empty() {
            self.stocks.base_url = default_stocks_base_url();
        }
        if self.trivia.base_url.is_empty() {
            self.trivia.base_url = default_trivia_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_http_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    ///
    /// Missing API keys are accepted: the affected section renders as
    /// unavailable instead.
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Names of providers that have no API key configured
    #[must_use]
    pub fn missing_api_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.weather.api_key.is_none() {
            missing.push(WEATHER_KEY_ENV);
        }
        if self.news.api_key.is_none() {
            missing.push(NEWS_KEY_ENV);
        }
        if self.stocks.api_key.is_none() {
            missing.push(STOCKS_KEY_ENV);
        }
        missing
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=300).contains(&self.http.timeout_seconds) {
            return Err(DigestError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.stocks.delay_seconds > 120 {
            return Err(DigestError::config(
                "Stock request delay cannot exceed 120 seconds",
            )
            .into());
        }

        if !(1..=100).contains(&self.news.page_size) {
            return Err(DigestError::config(
                "News page size must be between 1 and 100",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DigestError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DigestError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_units = ["imperial", "metric", "standard"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(DigestError::config(format!(
                "Invalid weather units '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        if self.weather.location.trim().is_empty() {
            return Err(DigestError::config("Weather location cannot be empty").into());
        }

        if self.news.topic.trim().is_empty() {
            return Err(DigestError::config("News topic cannot be empty").into());
        }

        if self.stocks.symbols.is_empty()
            || self.stocks.symbols.iter().any(|s| s.trim().is_empty())
        {
            return Err(DigestError::config(
                "At least one stock symbol is required and symbols cannot be blank",
            )
            .into());
        }

        for (name, url) in [
            ("Weather", &self.weather.base_url),
            ("News", &self.news.base_url),
            ("Stocks", &self.stocks.base_url),
            ("Trivia", &self.trivia.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DigestError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(DigestError::config("Output path cannot be empty").into());
        }

        Ok(())
    }
}
