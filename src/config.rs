use serde::Deserialize;
use std::path::Path;

use crate::aggregator::FailurePolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Market feed refresh interval in minutes, 0 disables it
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub newsapi: NewsApiConfig,
    #[serde(default)]
    pub naver: NaverConfig,
}

fn default_refresh_interval() -> u64 {
    15
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsApiConfig {
    #[serde(default = "default_newsapi_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Days of history requested for stock news; unset sends no date window
    #[serde(default)]
    pub lookback_days: Option<u32>,
}

fn default_newsapi_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_country() -> String {
    "kr".to_string()
}

fn default_category() -> String {
    "business".to_string()
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_newsapi_base_url(),
            api_key: String::new(),
            language: default_language(),
            country: default_country(),
            category: default_category(),
            lookback_days: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NaverConfig {
    #[serde(default = "default_naver_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_market_keywords")]
    pub market_keywords: Vec<String>,
}

fn default_naver_base_url() -> String {
    "https://openapi.naver.com/v1/search/news.json".to_string()
}

fn default_market_keywords() -> Vec<String> {
    ["코스피", "코스닥", "주식시장", "증시"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            base_url: default_naver_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            market_keywords: default_market_keywords(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Override provider credentials from `NEWS_API_KEY`, `NAVER_CLIENT_ID`
    /// and `NAVER_CLIENT_SECRET` when they are set.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("NEWS_API_KEY") {
            self.newsapi.api_key = key;
        }
        if let Some(id) = lookup("NAVER_CLIENT_ID") {
            self.naver.client_id = id;
        }
        if let Some(secret) = lookup("NAVER_CLIENT_SECRET") {
            self.naver.client_secret = secret;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            bind_address: default_bind_address(),
            request_timeout_secs: default_request_timeout(),
            failure_policy: FailurePolicy::default(),
            newsapi: NewsApiConfig::default(),
            naver: NaverConfig::default(),
        }
    }
}
