//! Shared HTTP plumbing for the provider clients

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};

use super::ProviderError;
use crate::config::HttpConfig;

/// Build the client shared by all providers
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// GET `url` and return the body of a successful response
pub(crate) async fn get_text(
    client: &Client,
    provider: &'static str,
    url: &str,
) -> std::result::Result<String, ProviderError> {
    let endpoint = strip_query(url);
    debug!(provider, endpoint, "Sending request");
    let start = Instant::now();

    let response = client.get(url).send().await?;
    let status = response.status();
    let elapsed = start.elapsed();

    debug!(
        provider,
        %status,
        "Response received in {:.3}s",
        elapsed.as_secs_f64()
    );
    if elapsed.as_secs() > 5 {
        warn!(provider, "Slow API response: {:.3}s", elapsed.as_secs_f64());
    }

    if !status.is_success() {
        return Err(ProviderError::from_status(status));
    }

    Ok(response.text().await?)
}

/// Drop the query string, which carries the API key
#[must_use]
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
