//! Data models for the daily digest
//!
//! This module contains the core domain models organized by provider:
//! - Weather: current conditions at the configured location
//! - News: top headlines for the configured topic
//! - Quote: latest price and daily change per tracked symbol
//! - Trivia: a random number fact
//! - Digest: the assembled document handed to the renderer

pub mod digest;
pub mod news;
pub mod quote;
pub mod trivia;
pub mod weather;

// Re-export all public types for convenient access
pub use digest::{DigestDocument, QuoteOutcome, Section};
pub use news::NewsHeadline;
pub use quote::{StockQuote, Trend};
pub use trivia::TriviaFact;
pub use weather::{TemperatureUnit, WeatherReading};
