// src/aggregate/error.rs
use thiserror::Error;

use crate::aggregate::types::{SourceError, SourceErrorKind};

/// Transport-level failure for one source. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} timed out after {ms}ms")]
    Timeout { url: String, ms: u64 },
}

/// Payload did not match the expected shape for its normalizer.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid feed xml: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("payload is neither an rss nor an atom document")]
    UnrecognizedFeed,
}

/// Unexpected orchestration failure. Fatal to the request, unlike the
/// per-source errors above.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("source task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<FetchError> for SourceError {
    fn from(e: FetchError) -> Self {
        SourceError {
            kind: SourceErrorKind::Fetch,
            message: e.to_string(),
        }
    }
}

impl From<NormalizeError> for SourceError {
    fn from(e: NormalizeError) -> Self {
        SourceError {
            kind: SourceErrorKind::Normalize,
            message: e.to_string(),
        }
    }
}
