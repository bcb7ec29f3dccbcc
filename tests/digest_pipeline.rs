//! End-to-end tests for the digest pipeline with stubbed providers

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use daily_digest::models::TemperatureUnit;
use daily_digest::providers::openweather::parse_current_weather;
use daily_digest::render::{self, NO_HEADLINES, TIMESTAMP_FORMAT};
use daily_digest::{
    DigestBuilder, DigestConfig, NewsHeadline, NewsProvider, ProviderError, QuoteProvider,
    StockQuote, TriviaFact, TriviaProvider, WeatherProvider, WeatherReading,
};
use rstest::rstest;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

const MALFORMED_WEATHER: &str = r#"{"weather": [], "name": "San Jose"}"#;

#[derive(Clone)]
enum WeatherStub {
    Ready,
    Body(&'static str),
}

#[async_trait]
impl WeatherProvider for WeatherStub {
    async fn current_weather(&self, location: &str) -> Result<WeatherReading, ProviderError> {
        match self {
            WeatherStub::Ready => Ok(WeatherReading {
                location: location.to_string(),
                city: "San Jose".to_string(),
                country: "US".to_string(),
                temperature: 68.4,
                unit: TemperatureUnit::Fahrenheit,
                condition: "scattered clouds".to_string(),
                fetched_at: fixed_time(7, 59, 58),
            }),
            WeatherStub::Body(body) => {
                parse_current_weather(body, location, TemperatureUnit::Fahrenheit, fixed_time(7, 59, 58))
            }
        }
    }
}

struct NewsStub(Vec<NewsHeadline>);

#[async_trait]
impl NewsProvider for NewsStub {
    async fn top_headlines(
        &self,
        _topic: &str,
        limit: usize,
    ) -> Result<Vec<NewsHeadline>, ProviderError> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

/// When one quote request started and when it answered
struct QuoteCall {
    symbol: String,
    started: Instant,
    finished: Instant,
}

/// Answers after `latency` and records every call
struct QuoteStub {
    latency: Duration,
    calls: Arc<Mutex<Vec<QuoteCall>>>,
}

#[async_trait]
impl QuoteProvider for QuoteStub {
    async fn quote(&self, symbol: &str) -> Result<StockQuote, ProviderError> {
        let started = Instant::now();
        tokio::time::sleep(self.latency).await;
        self.calls.lock().unwrap().push(QuoteCall {
            symbol: symbol.to_string(),
            started,
            finished: Instant::now(),
        });
        let (price, change_percent) = match symbol {
            "AAPL" => (189.5, 1.25),
            "GOOGL" => (140.1, -0.42),
            _ => return Err(ProviderError::NotFound(symbol.to_string())),
        };
        Ok(StockQuote {
            symbol: symbol.to_string(),
            price,
            change_percent,
        })
    }
}

struct TriviaStub;

#[async_trait]
impl TriviaProvider for TriviaStub {
    async fn random_fact(&self) -> Result<TriviaFact, ProviderError> {
        Ok(TriviaFact {
            number: 1729.0,
            text: "1729 is the smallest number expressible as the sum of two cubes in two different ways.".to_string(),
        })
    }
}

fn fixed_time(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, hour, minute, second).unwrap()
}

fn headlines() -> Vec<NewsHeadline> {
    vec![
        NewsHeadline {
            title: "Chipmakers rally on AI demand".to_string(),
            source: "Reuters".to_string(),
            url: Some("https://example.com/chips".to_string()),
        },
        NewsHeadline {
            title: "Open source browser engine hits 1.0".to_string(),
            source: "Ars Technica".to_string(),
            url: None,
        },
    ]
}

type QuoteCalls = Arc<Mutex<Vec<QuoteCall>>>;

fn builder_with(weather: WeatherStub, news: Vec<NewsHeadline>) -> (DigestBuilder, QuoteCalls) {
    builder_with_latency(weather, news, Duration::ZERO)
}

fn builder_with_latency(
    weather: WeatherStub,
    news: Vec<NewsHeadline>,
    latency: Duration,
) -> (DigestBuilder, QuoteCalls) {
    let config = DigestConfig::default();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let builder = DigestBuilder::new(
        &config,
        Box::new(weather),
        Box::new(NewsStub(news)),
        Box::new(QuoteStub {
            latency,
            calls: calls.clone(),
        }),
        Box::new(TriviaStub),
    );
    (builder, calls)
}

#[tokio::test(start_paused = true)]
async fn test_successful_run_renders_every_field() {
    let (builder, _) = builder_with(WeatherStub::Ready, headlines());

    let document = builder.collect(fixed_time(8, 0, 3)).await;
    let html = render::render(&document).unwrap();

    assert!(html.contains("Generated on 2026-10-18 08:00:03 UTC"));
    assert!(html.contains("San Jose, US: 68°F with scattered clouds."));
    assert!(html.contains("Chipmakers rally on AI demand"));
    assert!(html.contains("Reuters"));
    assert!(html.contains("Open source browser engine hits 1.0"));
    assert!(html.contains("Ars Technica"));
    assert!(html.contains("AAPL"));
    assert!(html.contains("$189.50"));
    assert!(html.contains("+1.25% ▲"));
    assert!(html.contains("GOOGL"));
    assert!(html.contains("$140.10"));
    assert!(html.contains("-0.42% ▼"));
    assert!(html.contains("1729 is the smallest number expressible as the sum of two cubes"));
    assert_eq!(document.unavailable_sections(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zero_headlines_render_placeholder() {
    let (builder, _) = builder_with(WeatherStub::Ready, Vec::new());

    let document = builder.collect(fixed_time(8, 0, 0)).await;
    let html = render::render(&document).unwrap();

    assert!(html.contains(NO_HEADLINES));
    assert!(html.contains("$189.50"));
}

#[tokio::test(start_paused = true)]
async fn test_quote_requests_are_spaced_by_delay() {
    let (builder, calls) = builder_with(WeatherStub::Ready, headlines());

    builder.collect(fixed_time(8, 0, 0)).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].symbol, "AAPL");
    assert_eq!(calls[1].symbol, "GOOGL");
    let gap = calls[1].started.duration_since(calls[0].finished);
    assert!(gap >= Duration::from_secs(13), "waited only {gap:?}");
}

#[rstest]
#[case::slow_quote(Duration::from_secs(10))]
#[case::timed_out_quote(Duration::from_secs(15))]
#[tokio::test(start_paused = true)]
async fn test_slow_quote_still_gets_full_pause(#[case] latency: Duration) {
    let (builder, calls) = builder_with_latency(WeatherStub::Ready, headlines(), latency);

    builder.collect(fixed_time(8, 0, 0)).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].finished.duration_since(calls[0].started), latency);
    let gap = calls[1].started.duration_since(calls[0].finished);
    assert!(gap >= Duration::from_secs(13), "waited only {gap:?} after a {latency:?} quote");
}

#[tokio::test(start_paused = true)]
async fn test_identical_inputs_render_identically_except_timestamp() {
    let (first, _) = builder_with(WeatherStub::Ready, headlines());
    let (second, _) = builder_with(WeatherStub::Ready, headlines());

    let morning = fixed_time(8, 0, 0);
    let later = fixed_time(8, 0, 42);
    let html_a = render::render(&first.collect(morning).await).unwrap();
    let html_b = render::render(&second.collect(later).await).unwrap();

    assert_ne!(html_a, html_b);
    let stamp_a = morning.format(TIMESTAMP_FORMAT).to_string();
    let stamp_b = later.format(TIMESTAMP_FORMAT).to_string();
    assert_eq!(html_a.replace(&stamp_a, ""), html_b.replace(&stamp_b, ""));

    let html_c = render::render(&second.collect(morning).await).unwrap();
    assert_eq!(html_a, html_c);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_weather_yields_placeholder() {
    let (builder, _) = builder_with(WeatherStub::Body(MALFORMED_WEATHER), headlines());

    let document = builder.collect(fixed_time(8, 0, 0)).await;
    assert!(matches!(
        document.weather.error(),
        Some(ProviderError::Malformed(_))
    ));

    let html = render::render(&document).unwrap();
    assert!(html.contains("Weather data for San Jose,US is temporarily unavailable."));
    assert!(html.contains("Chipmakers rally on AI demand"));
    assert!(html.contains("$189.50"));
    assert_eq!(document.unavailable_sections(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_publish_overwrites_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("public").join("index.html");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "stale digest").unwrap();

    let (builder, _) = builder_with(WeatherStub::Ready, headlines());
    builder.publish(&output, fixed_time(8, 0, 0)).await.unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("stale digest"));
    assert!(written.starts_with("<!DOCTYPE html>"));
    assert!(written.contains("Chipmakers rally on AI demand"));
}
