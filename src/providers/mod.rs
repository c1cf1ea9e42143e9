//! Clients for the external news search providers.
//!
//! Each client maps a logical query onto one provider's HTTP API and returns
//! that provider's own item shape. Normalization happens in the aggregator.

pub mod naver;
pub mod newsapi;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

pub use naver::NaverNewsClient;
pub use newsapi::NewsApiClient;

pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent("MarketNews/1.0 (News Aggregator)")
        .build()
}

/// Title and description text used by the stock relevance filter
pub trait Headline {
    fn headline(&self) -> &str;
    fn summary(&self) -> &str;
}

/// True when the title or description literally contains `symbol` or
/// `company_name` (case-sensitive). Empty needles never match.
pub fn is_relevant<H: Headline>(item: &H, symbol: &str, company_name: &str) -> bool {
    [symbol, company_name]
        .into_iter()
        .filter(|needle| !needle.is_empty())
        .any(|needle| item.headline().contains(needle) || item.summary().contains(needle))
}

pub(crate) fn filter_relevant<H: Headline>(
    items: Vec<H>,
    symbol: &str,
    company_name: &str,
) -> Vec<H> {
    items
        .into_iter()
        .filter(|item| is_relevant(item, symbol, company_name))
        .collect()
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;

    serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode {
        provider,
        message: e.to_string(),
    })
}
