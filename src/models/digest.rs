//! The assembled digest document

use chrono::{DateTime, Utc};

use super::{NewsHeadline, StockQuote, TriviaFact, WeatherReading};
use crate::providers::ProviderError;

/// Outcome of one provider call
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Unavailable(ProviderError),
}

impl<T> Section<T> {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Section::Ready(_) => None,
            Section::Unavailable(err) => Some(err),
        }
    }
}

impl<T> From<Result<T, ProviderError>> for Section<T> {
    fn from(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(err) => Section::Unavailable(err),
        }
    }
}

/// Quote result for one tracked symbol
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOutcome {
    pub symbol: String,
    pub quote: Section<StockQuote>,
}

/// Everything one run collected, ready to render
///
/// Built fresh on every run and never merged with earlier output.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestDocument {
    pub generated_at: DateTime<Utc>,
    /// Configured weather location, used in placeholders
    pub location: String,
    /// Configured news topic
    pub news_topic: String,
    pub weather: Section<WeatherReading>,
    pub news: Section<Vec<NewsHeadline>>,
    /// One entry per configured symbol, in configuration order
    pub quotes: Vec<QuoteOutcome>,
    pub trivia: Section<TriviaFact>,
}

impl DigestDocument {
    /// True when no quote could be fetched at all
    #[must_use]
    pub fn market_unavailable(&self) -> bool {
        self.quotes.iter().all(|outcome| !outcome.quote.is_ready())
    }

    /// Number of sections that fell back to a placeholder
    #[must_use]
    pub fn unavailable_sections(&self) -> usize {
        [
            !self.weather.is_ready(),
            !self.news.is_ready(),
            self.market_unavailable(),
            !self.trivia.is_ready(),
        ]
        .into_iter()
        .filter(|unavailable| *unavailable)
        .count()
    }
}
