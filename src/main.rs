use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_news::aggregator::Aggregator;
use market_news::config::Config;
use market_news::providers::{build_http_client, NaverNewsClient, NewsApiClient};
use market_news::routes::{self, AppState};
use market_news::store::{start_background_refresh, FeedStore};

const CONFIG_PATH: &str = "news.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        info!("{} not found, using defaults", CONFIG_PATH);
        Config::default()
    };
    config.apply_env();
    info!(
        "Loaded configuration: {} market keywords, failure policy {:?}",
        config.naver.market_keywords.len(),
        config.failure_policy
    );

    // Build provider clients and the feed store
    let client = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
    let aggregator = Aggregator::new(
        NewsApiClient::new(client.clone(), &config.newsapi),
        NaverNewsClient::new(client, &config.naver),
        config.failure_policy,
    );
    let store = Arc::new(FeedStore::new(aggregator));

    // Start background refresh task
    let bg_store = store.clone();
    let refresh_interval = config.refresh_interval;
    let refresh = tokio::spawn(async move {
        start_background_refresh(bg_store, refresh_interval).await;
    });

    let app = routes::router(Arc::new(AppState { store }));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address.as_str()).await?;
    info!("Server starting on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    refresh.abort();
    Ok(())
}
