//! Daily digest - weather, headlines, stock quotes and trivia on one static page
//!
//! This library fetches each section from its provider, assembles a
//! [`DigestDocument`], renders it to HTML and writes it to a fixed path.
//! A failing provider degrades only its own section.

pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod rate_limiter;
pub mod render;
pub mod writer;

// Re-export core types for public API
pub use config::DigestConfig;
pub use digest::DigestBuilder;
pub use error::DigestError;
pub use models::{
    DigestDocument, NewsHeadline, QuoteOutcome, Section, StockQuote, TriviaFact, WeatherReading,
};
pub use providers::{NewsProvider, ProviderError, QuoteProvider, TriviaProvider, WeatherProvider};
pub use rate_limiter::FixedDelay;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DigestError>;
