//! Alpha Vantage `GLOBAL_QUOTE` client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{ProviderError, QuoteProvider, http};
use crate::config::StocksConfig;
use crate::models::StockQuote;

pub struct AlphaVantageClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,

    // When throttled Alpha Vantage answers 200 with
    // { "Note": "Thank you for using Alpha Vantage! ... 5 calls per minute ..." }
    #[serde(rename = "Note")]
    note: Option<String>,

    // Newer throttle and plan messages use "Information" instead
    #[serde(rename = "Information")]
    information: Option<String>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

impl AlphaVantageClient {
    #[must_use]
    pub fn new(client: Client, config: &StocksConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self, symbol: &str, api_key: &str) -> String {
        format!(
            "{}/query?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol),
            urlencoding::encode(api_key)
        )
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    #[instrument(skip(self))]
    async fn quote(&self, symbol: &str) -> Result<StockQuote, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = self.request_url(symbol, api_key);
        let body = http::get_text(&self.client, "alphavantage", &url).await?;
        let quote = parse_global_quote(&body, symbol)?;

        info!(
            "{}: {} ({})",
            quote.symbol,
            quote.format_price(),
            quote.format_change()
        );
        Ok(quote)
    }
}

/// Parse a `GLOBAL_QUOTE` response body for `symbol`
pub fn parse_global_quote(body: &str, symbol: &str) -> Result<StockQuote, ProviderError> {
    let response: GlobalQuoteResponse =
        serde_json::from_str(body).map_err(ProviderError::malformed)?;

    if response.note.is_some() {
        return Err(ProviderError::RateLimited);
    }

    if let Some(information) = response.information {
        if information.to_lowercase().contains("rate limit") {
            return Err(ProviderError::RateLimited);
        }
        return Err(ProviderError::Rejected(information));
    }

    if let Some(message) = response.error_message {
        return Err(ProviderError::Rejected(message));
    }

    // An unknown symbol comes back as an empty "Global Quote" object
    let quote = response.global_quote.unwrap_or_default();
    let (Some(price), Some(change_percent)) = (quote.price, quote.change_percent) else {
        return Err(ProviderError::NotFound(symbol.to_string()));
    };

    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| ProviderError::malformed(format!("price '{price}': {e}")))?;
    let change_percent = change_percent
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| ProviderError::malformed(format!("change percent '{change_percent}': {e}")))?;

    Ok(StockQuote {
        symbol: quote.symbol.unwrap_or_else(|| symbol.to_string()),
        price,
        change_percent,
    })
}
