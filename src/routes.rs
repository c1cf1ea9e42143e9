use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::store::{FeedState, FeedStore, FetchStatus};

pub struct AppState {
    pub store: Arc<FeedStore>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/news", get(feed))
        .route("/api/news/stock", get(stock_news))
        .route("/api/news/market", get(market_news))
        .route("/api/news/market/refresh", post(refresh_market))
        .route("/api/news/status", get(status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Custom error type
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, format!("Error: {}", self.message)).into_response()
    }
}

// Route handlers
pub async fn feed(State(state): State<Arc<AppState>>) -> Json<FeedState> {
    Json(state.store.snapshot())
}

#[derive(Deserialize)]
pub struct StockQuery {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub company: String,
}

pub async fn stock_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockQuery>,
) -> Result<Json<FeedState>, AppError> {
    let symbol = query.symbol.trim();
    if symbol.is_empty() {
        return Err(AppError::bad_request("symbol is required"));
    }

    state.store.fetch_stock_news(symbol, query.company.trim()).await;
    Ok(Json(state.store.snapshot()))
}

pub async fn market_news(State(state): State<Arc<AppState>>) -> Json<FeedState> {
    state.store.fetch_market_news().await;
    Json(state.store.snapshot())
}

pub async fn refresh_market(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.store.mark_loading();
    let store = state.store.clone();
    tokio::spawn(async move {
        store.fetch_market_news().await;
    });

    (StatusCode::ACCEPTED, Json(state.store.status()))
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<FetchStatus> {
    Json(state.store.status())
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
