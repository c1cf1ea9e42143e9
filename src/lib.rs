//! Market News - a stock news aggregator
//!
//! This crate queries NewsAPI and Naver news search concurrently, normalizes
//! their results into one shape, drops duplicate links and serves the merged
//! newest-first feed over a small JSON API.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod normalize;
pub mod providers;
pub mod routes;
pub mod store;
