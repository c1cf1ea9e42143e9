//! Feed state shared with display consumers.
//!
//! The store owns the last aggregated feed and the fetch status. Consumers
//! read a snapshot or subscribe for changes; only the two fetch operations
//! write. Every write replaces the whole [`FeedState`], so a reader never
//! sees a feed from one fetch paired with the status of another.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info};

use crate::aggregator::Aggregator;
use crate::error::AggregateError;
use crate::normalize::NewsItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedState {
    pub items: Arc<Vec<NewsItem>>,
    pub status: FetchStatus,
}

pub struct FeedStore {
    aggregator: Aggregator,
    state: watch::Sender<FeedState>,
}

impl FeedStore {
    pub fn new(aggregator: Aggregator) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self { aggregator, state }
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.borrow().status.clone()
    }

    /// Receiver notified after every status or feed change
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Flag a fetch as in flight before the aggregator is called
    pub fn mark_loading(&self) {
        self.set_status(FetchStatus::Loading);
    }

    pub async fn fetch_stock_news(&self, symbol: &str, company_name: &str) {
        self.mark_loading();
        let result = self.aggregator.fetch_stock_news(symbol, company_name).await;
        self.finish(result);
    }

    pub async fn fetch_market_news(&self) {
        self.mark_loading();
        let result = self.aggregator.fetch_market_news().await;
        self.finish(result);
    }

    fn set_status(&self, status: FetchStatus) {
        self.state.send_modify(|state| state.status = status);
    }

    fn finish(&self, result: Result<Vec<NewsItem>, AggregateError>) {
        match result {
            Ok(items) => {
                info!("Feed updated with {} items", items.len());
                self.state.send_modify(|state| {
                    state.items = Arc::new(items);
                    state.status = FetchStatus::Idle;
                });
            }
            Err(e) => {
                error!("News fetch failed: {}", e);
                self.set_status(FetchStatus::Error(e.to_string()));
            }
        }
    }
}

fn refresh_period(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

pub async fn start_background_refresh(store: Arc<FeedStore>, interval_minutes: u64) {
    if interval_minutes == 0 {
        info!("Background market refresh disabled");
        return;
    }
    let interval = refresh_period(interval_minutes);

    info!("Starting initial market news fetch");
    store.fetch_market_news().await;

    loop {
        tokio::time::sleep(interval).await;
        info!("Starting scheduled market news refresh");
        store.fetch_market_news().await;
    }
}
