//! NewsAPI top-headlines client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{NewsProvider, ProviderError, http};
use crate::config::NewsConfig;
use crate::models::NewsHeadline;

/// Title NewsAPI substitutes for articles pulled by the publisher
const REMOVED_TITLE: &str = "[Removed]";

pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

impl NewsApiClient {
    #[must_use]
    pub fn new(client: Client, config: &NewsConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self, topic: &str, limit: usize, api_key: &str) -> String {
        format!(
            "{}/top-headlines?q={}&pageSize={}&apiKey={}",
            self.base_url,
            urlencoding::encode(topic),
            limit,
            urlencoding::encode(api_key)
        )
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    #[instrument(skip(self))]
    async fn top_headlines(
        &self,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<NewsHeadline>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = self.request_url(topic, limit, api_key);
        let body = http::get_text(&self.client, "newsapi", &url).await?;
        let headlines = parse_headlines(&body, limit)?;

        info!("Fetched {} headlines for '{}'", headlines.len(), topic);
        Ok(headlines)
    }
}

/// Parse a `/top-headlines` response body, keeping at most `limit` usable articles
pub fn parse_headlines(body: &str, limit: usize) -> Result<Vec<NewsHeadline>, ProviderError> {
    let response: HeadlinesResponse =
        serde_json::from_str(body).map_err(ProviderError::malformed)?;

    if response.status != "ok" {
        let reason = response
            .message
            .or(response.code)
            .unwrap_or_else(|| format!("status '{}'", response.status));
        return Err(ProviderError::Rejected(reason));
    }

    let total = response.articles.len();
    let headlines: Vec<NewsHeadline> = response
        .articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title?.trim().to_string();
            if title.is_empty() || title == REMOVED_TITLE {
                return None;
            }
            let source = article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown source".to_string());
            Some(NewsHeadline {
                title,
                source,
                url: article.url,
            })
        })
        .take(limit)
        .collect();

    if headlines.len() < total {
        debug!("Skipped {} unusable articles", total - headlines.len());
    }

    Ok(headlines)
}
