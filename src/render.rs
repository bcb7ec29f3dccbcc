//! HTML rendering of a [`DigestDocument`]
//!
//! The page layout lives in `templates/digest.html` and is compiled in by
//! askama, which HTML-escapes every inserted value. This module only turns the
//! document into display strings; for a given document the output is always
//! byte-identical.

use askama::Template;

use crate::models::{DigestDocument, NewsHeadline, QuoteOutcome, Section};
use crate::providers::ProviderError;
use crate::{Result, VERSION};

/// Format of the "Generated on" line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub const NO_HEADLINES: &str = "No headlines today.";
pub const NEWS_UNAVAILABLE: &str = "Top news headlines are temporarily unavailable.";
pub const MARKET_UNAVAILABLE: &str =
    "Market data is temporarily unavailable due to an external API issue. Please check back later.";
pub const TRIVIA_UNAVAILABLE: &str = "A fun fact is not available right now. Try again later!";

#[derive(Template)]
#[template(path = "digest.html")]
struct DigestPage {
    generated_at: String,
    weather: String,
    weather_available: bool,
    news_topic: String,
    headlines: Vec<HeadlineRow>,
    news_notice: String,
    quotes: Vec<QuoteRow>,
    market_notice: String,
    trivia: String,
    trivia_available: bool,
    version: &'static str,
}

struct HeadlineRow {
    title: String,
    source: String,
    /// Empty when the article has no link
    url: String,
}

struct QuoteRow {
    symbol: String,
    price: String,
    change: String,
    arrow: &'static str,
    trend: &'static str,
    /// Set instead of price and change when the quote is unavailable
    note: String,
}

/// Render the digest page
pub fn render(document: &DigestDocument) -> Result<String> {
    Ok(DigestPage::from(document).render()?)
}

/// Placeholder for a symbol whose quote could not be fetched
#[must_use]
pub fn quote_note(err: &ProviderError) -> &'static str {
    match err {
        ProviderError::Timeout => "Stock data currently unavailable (API timeout).",
        ProviderError::RateLimited => "API rate limit hit. Waiting for next run.",
        ProviderError::NotFound(_) => "No data returned (likely invalid symbol).",
        ProviderError::Malformed(_) => "Error parsing data (check API key/symbol).",
        ProviderError::MissingApiKey => "No API key configured.",
        ProviderError::Rejected(_) => "Request rejected by the data provider.",
        ProviderError::Network(_) | ProviderError::Status(_) => {
            "Stock data currently unavailable."
        }
    }
}

#[must_use]
pub fn weather_unavailable(location: &str) -> String {
    format!("Weather data for {location} is temporarily unavailable.")
}

impl From<&DigestDocument> for DigestPage {
    fn from(document: &DigestDocument) -> Self {
        let (weather, weather_available) = match &document.weather {
            Section::Ready(reading) => (reading.summary(), true),
            Section::Unavailable(_) => (weather_unavailable(&document.location), false),
        };

        let (headlines, news_notice) = match &document.news {
            Section::Ready(headlines) if headlines.is_empty() => (Vec::new(), NO_HEADLINES),
            Section::Ready(headlines) => (headlines.iter().map(HeadlineRow::from).collect(), ""),
            Section::Unavailable(_) => (Vec::new(), NEWS_UNAVAILABLE),
        };

        let (quotes, market_notice) = if document.market_unavailable() {
            (Vec::new(), MARKET_UNAVAILABLE)
        } else {
            (document.quotes.iter().map(QuoteRow::from).collect(), "")
        };

        let (trivia, trivia_available) = match &document.trivia {
            Section::Ready(fact) => (fact.text.clone(), true),
            Section::Unavailable(_) => (TRIVIA_UNAVAILABLE.to_string(), false),
        };

        Self {
            generated_at: document.generated_at.format(TIMESTAMP_FORMAT).to_string(),
            weather,
            weather_available,
            news_topic: document.news_topic.clone(),
            headlines,
            news_notice: news_notice.to_string(),
            quotes,
            market_notice: market_notice.to_string(),
            trivia,
            trivia_available,
            version: VERSION,
        }
    }
}

impl From<&NewsHeadline> for HeadlineRow {
    fn from(headline: &NewsHeadline) -> Self {
        Self {
            title: headline.title.clone(),
            source: headline.source.clone(),
            url: headline
                .url
                .as_deref()
                .filter(|url| is_web_link(url))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Only plain web links become `href`s; anything else renders as text
fn is_web_link(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

impl From<&QuoteOutcome> for QuoteRow {
    fn from(outcome: &QuoteOutcome) -> Self {
        match &outcome.quote {
            Section::Ready(quote) => {
                let trend = quote.trend();
                Self {
                    symbol: outcome.symbol.clone(),
                    price: quote.format_price(),
                    change: quote.format_change(),
                    arrow: trend.arrow(),
                    trend: trend.css_class(),
                    note: String::new(),
                }
            }
            Section::Unavailable(err) => Self {
                symbol: outcome.symbol.clone(),
                price: String::new(),
                change: String::new(),
                arrow: "",
                trend: "",
                note: quote_note(err).to_string(),
            },
        }
    }
}
