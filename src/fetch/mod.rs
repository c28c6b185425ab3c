// src/fetch/mod.rs
pub mod config;
pub mod http;
pub mod types;

use std::time::Duration;

use futures::future::join_all;
use metrics::{counter, histogram};

use crate::fetch::types::{FetchError, FetchResult, SourceFetcher};
use crate::sources::Source;

/// Run every configured fetch concurrently under one shared deadline and
/// collect each outcome into its own slot. One source failing or timing
/// out never aborts the others; the call returns only once every fetch has
/// reached a terminal state. Slot order follows the fetcher list, not
/// completion order.
pub async fn fetch_all(fetchers: &[Box<dyn SourceFetcher>], deadline: Duration) -> FetchResult {
    let t0 = std::time::Instant::now();

    let batch = join_all(fetchers.iter().map(|f| async move {
        let outcome = match tokio::time::timeout(deadline, f.fetch()).await {
            Ok(done) => done,
            // Still pending at the shared deadline: abandoned, no partial
            // payload is accepted past this point.
            Err(_) => Err(FetchError::Timeout),
        };
        (f.source(), outcome)
    }))
    .await;

    let mut slots = Vec::with_capacity(batch.len());
    for (source, outcome) in batch {
        match outcome {
            Ok(payload) => slots.push((source, Some(payload))),
            Err(e) => {
                tracing::warn!(
                    source = source.as_str(),
                    kind = e.kind(),
                    error = %e,
                    "source fetch failed"
                );
                counter!("fetch_source_errors_total").increment(1);
                slots.push((source, None));
            }
        }
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("fetch_batch_ms").record(ms);

    FetchResult::new(slots)
}

/// Build the default HTTP fetcher set, one per enumerated source, sharing
/// one client scoped to the run.
pub fn default_fetchers(config: &config::FetchConfig) -> Vec<Box<dyn SourceFetcher>> {
    let client = reqwest::Client::builder()
        .user_agent("multi-source-aggregator/0.1")
        .connect_timeout(Duration::from_secs(4))
        .build()
        .expect("reqwest client");

    Source::ALL
        .iter()
        .map(|&source| {
            Box::new(http::HttpFetcher::new(
                source,
                config.endpoint(source),
                client.clone(),
            )) as Box<dyn SourceFetcher>
        })
        .collect()
}
