//! NewsAPI.org client

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{filter_relevant, read_json, Headline};
use crate::config::NewsApiConfig;
use crate::error::ProviderError;

const PROVIDER: &str = "NewsAPI";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: String,
    pub content: Option<String>,
}

impl Headline for Article {
    fn headline(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
    country: String,
    category: String,
    lookback_days: Option<u32>,
}

impl NewsApiClient {
    pub fn new(client: Client, config: &NewsApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            country: config.country.clone(),
            category: config.category.clone(),
            lookback_days: config.lookback_days,
        }
    }

    /// Relevancy-sorted search. NewsAPI pages rather than offsets, so
    /// `offset` is mapped to the page containing it.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        count: u32,
        offset: u32,
    ) -> Result<Vec<Article>, ProviderError> {
        let page_size = count.max(1);
        let page = offset / page_size + 1;
        self.get(
            "everything",
            vec![
                ("q", query.to_string()),
                ("language", self.language.clone()),
                ("sortBy", "relevancy".to_string()),
                ("pageSize", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    pub async fn stock_news(
        &self,
        symbol: &str,
        company_name: &str,
    ) -> Result<Vec<Article>, ProviderError> {
        let query = if company_name.is_empty() {
            symbol.to_string()
        } else {
            format!("{} OR {}", symbol, company_name)
        };

        let mut params = vec![("q", query), ("language", self.language.clone())];
        if let Some(days) = self.lookback_days {
            let to = Utc::now().date_naive();
            let from = to - Duration::days(i64::from(days));
            params.push(("from", from.to_string()));
            params.push(("to", to.to_string()));
        }
        params.push(("sortBy", "publishedAt".to_string()));

        let articles = self.get("everything", params).await?;
        Ok(filter_relevant(articles, symbol, company_name))
    }

    pub async fn market_news(&self) -> Result<Vec<Article>, ProviderError> {
        self.get(
            "top-headlines",
            vec![
                ("country", self.country.clone()),
                ("category", self.category.clone()),
            ],
        )
        .await
    }

    async fn get(
        &self,
        endpoint: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<Vec<Article>, ProviderError> {
        params.push(("apiKey", self.api_key.clone()));

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: PROVIDER,
                source,
            })?;

        let body: NewsApiResponse = read_json(PROVIDER, response).await?;
        info!(
            "NewsAPI /{} returned {} of {} articles",
            endpoint,
            body.articles.len(),
            body.total_results
        );
        Ok(body.articles)
    }
}
