use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{AggregateError, ProviderError};
use crate::normalize::{newest_first, NewsItem};
use crate::providers::{NaverNewsClient, NewsApiClient};

/// What a provider error does to an aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The failed provider contributes zero items
    #[default]
    Degrade,
    /// The whole aggregation fails
    Strict,
}

pub struct Aggregator {
    newsapi: NewsApiClient,
    naver: NaverNewsClient,
    policy: FailurePolicy,
}

impl Aggregator {
    pub fn new(newsapi: NewsApiClient, naver: NaverNewsClient, policy: FailurePolicy) -> Self {
        Self {
            newsapi,
            naver,
            policy,
        }
    }

    pub async fn fetch_stock_news(
        &self,
        symbol: &str,
        company_name: &str,
    ) -> Result<Vec<NewsItem>, AggregateError> {
        info!("Fetching stock news for {} ({})", symbol, company_name);
        let (naver, newsapi) = tokio::join!(
            self.naver.stock_news(symbol, company_name),
            self.newsapi.stock_news(symbol, company_name),
        );
        self.combine(naver, newsapi)
    }

    pub async fn fetch_market_news(&self) -> Result<Vec<NewsItem>, AggregateError> {
        info!("Fetching market news");
        let (naver, newsapi) = tokio::join!(self.naver.market_news(), self.newsapi.market_news());
        self.combine(naver, newsapi)
    }

    /// Naver items come first, so Naver's copy of a shared link is kept.
    fn combine<A, B>(
        &self,
        first: Result<Vec<A>, ProviderError>,
        second: Result<Vec<B>, ProviderError>,
    ) -> Result<Vec<NewsItem>, AggregateError>
    where
        A: Into<NewsItem>,
        B: Into<NewsItem>,
    {
        let first = self.apply_policy(first)?;
        let second = self.apply_policy(second)?;

        let feed = merge_feed(
            first
                .into_iter()
                .map(Into::into)
                .chain(second.into_iter().map(Into::into)),
        );
        info!("Aggregated feed has {} items", feed.len());
        Ok(feed)
    }

    fn apply_policy<T>(
        &self,
        result: Result<Vec<T>, ProviderError>,
    ) -> Result<Vec<T>, AggregateError> {
        match (result, self.policy) {
            (Ok(items), _) => Ok(items),
            (Err(e), FailurePolicy::Degrade) => {
                warn!("Dropping {} results: {}", e.provider(), e);
                Ok(Vec::new())
            }
            (Err(e), FailurePolicy::Strict) => Err(e.into()),
        }
    }
}

/// Deduplicate by `link` keeping the first occurrence, then stable-sort
/// newest first with unparseable timestamps at the end.
pub fn merge_feed<I>(items: I) -> Vec<NewsItem>
where
    I: IntoIterator<Item = NewsItem>,
{
    let mut seen = HashSet::new();
    let mut keyed: Vec<_> = items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .map(|item| (item.published(), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| newest_first(a, b));
    keyed.into_iter().map(|(_, item)| item).collect()
}
