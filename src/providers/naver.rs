//! Naver news search client

use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{filter_relevant, read_json, Headline};
use crate::config::NaverConfig;
use crate::error::ProviderError;

const PROVIDER: &str = "Naver";
const STOCK_NEWS_COUNT: u32 = 20;
const MARKET_NEWS_COUNT: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverSearchResponse {
    #[serde(default)]
    pub last_build_date: Option<String>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub display: u32,
    #[serde(default)]
    pub items: Vec<NaverItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NaverItem {
    pub title: String,
    #[serde(default)]
    pub originallink: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
}

impl Headline for NaverItem {
    fn headline(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }
}

pub struct NaverNewsClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    market_keywords: Vec<String>,
}

impl NaverNewsClient {
    pub fn new(client: Client, config: &NaverConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            market_keywords: config.market_keywords.clone(),
        }
    }

    /// Date-sorted search; `offset` is Naver's 1-based `start`.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        count: u32,
        offset: u32,
    ) -> Result<Vec<NaverItem>, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", query.to_string()),
                ("display", count.to_string()),
                ("start", offset.to_string()),
                ("sort", "date".to_string()),
            ])
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: PROVIDER,
                source,
            })?;

        let body: NaverSearchResponse = read_json(PROVIDER, response).await?;
        info!("Naver returned {} of {} items", body.items.len(), body.total);
        Ok(body.items)
    }

    pub async fn stock_news(
        &self,
        symbol: &str,
        company_name: &str,
    ) -> Result<Vec<NaverItem>, ProviderError> {
        let query = format!("{} {}", symbol, company_name);
        let items = self.search(query.trim(), STOCK_NEWS_COUNT, 1).await?;
        Ok(filter_relevant(items, symbol, company_name))
    }

    /// One search per market keyword, all in flight at once, flattened in
    /// keyword order. Failed keywords are skipped unless every one fails.
    pub async fn market_news(&self) -> Result<Vec<NaverItem>, ProviderError> {
        let searches = self
            .market_keywords
            .iter()
            .map(|keyword| self.search(keyword, MARKET_NEWS_COUNT, 1));
        let results = join_all(searches).await;

        let mut items = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0;
        for (keyword, result) in self.market_keywords.iter().zip(results) {
            match result {
                Ok(batch) => {
                    succeeded += 1;
                    items.extend(batch);
                }
                Err(e) => {
                    warn!("Naver market query '{}' failed: {}", keyword, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(items),
        }
    }
}
