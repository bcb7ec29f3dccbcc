//! Digest builder
//!
//! Calls the four providers one after another, spacing the quote requests
//! with a [`FixedDelay`], and assembles the results into a
//! [`DigestDocument`]. A failing provider only degrades its own section.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DigestConfig;
use crate::models::{DigestDocument, QuoteOutcome, Section};
use crate::providers::{
    AlphaVantageClient, NewsApiClient, NewsProvider, NumbersApiClient, OpenWeatherClient,
    ProviderError, QuoteProvider, TriviaProvider, WeatherProvider, http,
};
use crate::rate_limiter::FixedDelay;
use crate::{render, writer};

pub struct DigestBuilder {
    weather: Box<dyn WeatherProvider>,
    news: Box<dyn NewsProvider>,
    quotes: Box<dyn QuoteProvider>,
    trivia: Box<dyn TriviaProvider>,
    location: String,
    news_topic: String,
    news_limit: usize,
    symbols: Vec<String>,
    quote_delay: Duration,
}

impl DigestBuilder {
    /// Create a builder over the given providers
    pub fn new(
        config: &DigestConfig,
        weather: Box<dyn WeatherProvider>,
        news: Box<dyn NewsProvider>,
        quotes: Box<dyn QuoteProvider>,
        trivia: Box<dyn TriviaProvider>,
    ) -> Self {
        Self {
            weather,
            news,
            quotes,
            trivia,
            location: config.weather.location.clone(),
            news_topic: config.news.topic.clone(),
            news_limit: config.news.page_size as usize,
            symbols: config.stocks.symbols.clone(),
            quote_delay: config.stocks.delay(),
        }
    }

    /// Create a builder backed by the real HTTP providers
    pub fn from_config(config: &DigestConfig) -> Result<Self> {
        let client = http::build_client(&config.http)?;

        Ok(Self::new(
            config,
            Box::new(OpenWeatherClient::new(client.clone(), &config.weather)),
            Box::new(NewsApiClient::new(client.clone(), &config.news)),
            Box::new(AlphaVantageClient::new(client.clone(), &config.stocks)),
            Box::new(NumbersApiClient::new(client, &config.trivia)),
        ))
    }

    /// Fetch every section. Never fails: unavailable data becomes a placeholder.
    pub async fn collect(&self, generated_at: DateTime<Utc>) -> DigestDocument {
        let weather = Section::from(self.weather.current_weather(&self.location).await);
        log_unavailable("weather", &weather);

        let news = Section::from(
            self.news
                .top_headlines(&self.news_topic, self.news_limit)
                .await,
        );
        log_unavailable("news", &news);

        let quotes = self.collect_quotes().await;

        let trivia = Section::from(self.trivia.random_fact().await);
        log_unavailable("trivia", &trivia);

        let document = DigestDocument {
            generated_at,
            location: self.location.clone(),
            news_topic: self.news_topic.clone(),
            weather,
            news,
            quotes,
            trivia,
        };

        info!(
            unavailable = document.unavailable_sections(),
            "Collected digest data"
        );
        document
    }

    /// Collect, render and write the digest to `output`
    ///
    /// Only a render or write failure is returned as an error.
    pub async fn publish(
        &self,
        output: &Path,
        generated_at: DateTime<Utc>,
    ) -> crate::Result<DigestDocument> {
        let document = self.collect(generated_at).await;
        let html = render::render(&document)?;
        writer::write_digest(output, &html)?;
        Ok(document)
    }

    async fn collect_quotes(&self) -> Vec<QuoteOutcome> {
        let mut limiter = FixedDelay::new(self.quote_delay);
        let mut outcomes = Vec::with_capacity(self.symbols.len());
        let mut halted: Option<ProviderError> = None;

        for symbol in &self.symbols {
            if let Some(err) = &halted {
                outcomes.push(QuoteOutcome {
                    symbol: symbol.clone(),
                    quote: Section::Unavailable(err.clone()),
                });
                continue;
            }

            limiter.acquire().await;
            let quote = Section::from(self.quotes.quote(symbol).await);

            if let Section::Unavailable(err) = &quote {
                warn!(section = "stocks", symbol = %symbol, error = %err, "Quote unavailable");
                if halts_quotes(err) {
                    warn!("Skipping remaining symbols until the next run");
                    halted = Some(err.clone());
                }
            }

            outcomes.push(QuoteOutcome {
                symbol: symbol.clone(),
                quote,
            });
        }

        outcomes
    }
}

/// Errors that would repeat for every remaining symbol
fn halts_quotes(err: &ProviderError) -> bool {
    matches!(err, ProviderError::RateLimited | ProviderError::MissingApiKey)
}

fn log_unavailable<T>(section: &'static str, outcome: &Section<T>) {
    if let Some(err) = outcome.error() {
        warn!(section, error = %err, "Section unavailable, using placeholder");
    }
}

/// Run the whole pipeline once with the real providers
pub async fn run(config: &DigestConfig) -> Result<DigestDocument> {
    for key in config.missing_api_keys() {
        warn!("{} is not set; its section will be unavailable", key);
    }

    let builder = DigestBuilder::from_config(config)?;
    let document = builder.publish(&config.output.path, Utc::now()).await?;
    Ok(document)
}
