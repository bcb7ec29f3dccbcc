//! Numbers API trivia client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{ProviderError, TriviaProvider, http};
use crate::config::TriviaConfig;
use crate::models::TriviaFact;

/// No key required
pub struct NumbersApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct FactResponse {
    text: String,
    number: f64,
}

impl NumbersApiClient {
    #[must_use]
    pub fn new(client: Client, config: &TriviaConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// JSON form, so the number and the text arrive separately
    fn request_url(&self) -> String {
        format!("{}/random/trivia?json", self.base_url)
    }
}

#[async_trait]
impl TriviaProvider for NumbersApiClient {
    #[instrument(skip(self))]
    async fn random_fact(&self) -> Result<TriviaFact, ProviderError> {
        let url = self.request_url();
        let body = http::get_text(&self.client, "numbersapi", &url).await?;
        let fact = parse_fact(&body)?;

        info!("Trivia fact about {}", fact.number);
        Ok(fact)
    }
}

pub fn parse_fact(body: &str) -> Result<TriviaFact, ProviderError> {
    let response: FactResponse = serde_json::from_str(body).map_err(ProviderError::malformed)?;

    let text = response.text.trim();
    if text.is_empty() {
        return Err(ProviderError::malformed("empty fact text"));
    }

    Ok(TriviaFact {
        number: response.number,
        text: text.to_string(),
    })
}
