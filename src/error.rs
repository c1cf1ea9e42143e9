//! Error types for provider clients and aggregation

use thiserror::Error;

/// Errors raised by a single provider client
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure before a response was received
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-2xx status
    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    /// Body was not the JSON shape the provider documents
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Request { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. } => provider,
        }
    }
}

/// Errors that abort a whole aggregation
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A provider failed while the strict failure policy was active
    #[error("news provider unavailable: {0}")]
    Provider(#[from] ProviderError),
}
