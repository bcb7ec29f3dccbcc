//! Provider clients
//!
//! One client per external REST API. Every client makes a single GET per
//! call and reports failures as a [`ProviderError`]; the digest builder turns
//! those into placeholder sections.

pub mod alphavantage;
pub mod error;
pub mod http;
pub mod newsapi;
pub mod numbers;
pub mod openweather;

use async_trait::async_trait;

use crate::models::{NewsHeadline, StockQuote, TriviaFact, WeatherReading};

pub use alphavantage::AlphaVantageClient;
pub use error::ProviderError;
pub use newsapi::NewsApiClient;
pub use numbers::NumbersApiClient;
pub use openweather::OpenWeatherClient;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, location: &str) -> Result<WeatherReading, ProviderError>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Top headlines for `topic`, at most `limit` of them. May be empty.
    async fn top_headlines(
        &self,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<NewsHeadline>, ProviderError>;
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<StockQuote, ProviderError>;
}

#[async_trait]
pub trait TriviaProvider: Send + Sync {
    async fn random_fact(&self) -> Result<TriviaFact, ProviderError>;
}
