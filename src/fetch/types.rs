// src/fetch/types.rs
use serde_json::Value;
use thiserror::Error;

use crate::sources::Source;

/// Raw decoded response body for one source. Shapes differ per source
/// (wrapper object vs. bare array), so the payload stays untyped until the
/// transform stage decodes individual items.
pub type SourcePayload = Value;

/// Classified failure of a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("bad status: {0}")]
    BadStatus(reqwest::StatusCode),
    #[error("deadline exceeded")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Stable failure-kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::BadStatus(_) => "bad-status",
            FetchError::Timeout => "timeout",
            FetchError::Transport(_) => "transport-error",
        }
    }
}

#[async_trait::async_trait]
pub trait SourceFetcher: Send + Sync {
    /// One GET against the source endpoint; no retries. Every failure comes
    /// back classified, never as a panic.
    async fn fetch(&self) -> Result<SourcePayload, FetchError>;
    fn source(&self) -> Source;
}

/// Per-run aggregation of fetch outcomes. Slot order is the fetcher
/// configuration order, never completion order, so downstream iteration is
/// deterministic. Absent means the fetch failed; an empty payload is still
/// a success.
#[derive(Debug)]
pub struct FetchResult {
    slots: Vec<(Source, Option<SourcePayload>)>,
}

impl FetchResult {
    pub(crate) fn new(slots: Vec<(Source, Option<SourcePayload>)>) -> Self {
        Self { slots }
    }

    pub fn payload(&self, source: Source) -> Option<&SourcePayload> {
        self.slots
            .iter()
            .find(|(s, _)| *s == source)
            .and_then(|(_, p)| p.as_ref())
    }

    /// Slots in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (Source, Option<&SourcePayload>)> {
        self.slots.iter().map(|(s, p)| (*s, p.as_ref()))
    }

    pub fn succeeded(&self) -> usize {
        self.slots.iter().filter(|(_, p)| p.is_some()).count()
    }
}
