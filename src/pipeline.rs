// src/pipeline.rs
use std::time::Duration;

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::fetch::{self, config::FetchConfig, types::SourceFetcher};
use crate::normalize::{filter_by_source, tagged_items};
use crate::sources::Source;
use crate::transform::{transform, CanonicalRecord};

/// One-time metrics registration (so series show up on an exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "fetch_source_errors_total",
            "Source fetch failures (bad status, timeout, transport)."
        );
        describe_counter!(
            "normalize_malformed_payloads_total",
            "Payloads present but not matching their source's shape."
        );
        describe_counter!(
            "transform_malformed_items_total",
            "Items dropped because typed projection failed."
        );
        describe_counter!("pipeline_records_total", "Canonical records produced.");
        describe_histogram!(
            "fetch_batch_ms",
            "Concurrent fetch batch wall time in milliseconds."
        );
        describe_gauge!(
            "pipeline_last_run_ts",
            "Unix ts when the pipeline last ran."
        );
    });
}

/// Run the pipeline against the given fetcher set: concurrent fetch, then
/// the lazy normalize -> filter -> transform chain, materialized exactly
/// once at the end. Per-source failure degrades to "no items from that
/// source"; the run itself cannot fail.
pub async fn run_with_fetchers(
    fetchers: &[Box<dyn SourceFetcher>],
    deadline: Duration,
    source_filter: Option<Source>,
) -> Vec<CanonicalRecord> {
    ensure_metrics_described();

    let result = fetch::fetch_all(fetchers, deadline).await;

    let tagged = tagged_items(&result);
    let filtered = filter_by_source(tagged, source_filter);
    let records: Vec<CanonicalRecord> = transform(filtered).collect();

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("pipeline_records_total").increment(records.len() as u64);
    gauge!("pipeline_last_run_ts").set(now as f64);

    tracing::info!(
        target: "pipeline",
        sources_ok = result.succeeded(),
        records = records.len(),
        filter = source_filter.map(|s| s.as_str()).unwrap_or("none"),
        "pipeline run complete"
    );

    records
}

/// Convenience entry point: load config, build the default HTTP fetchers
/// (client scoped to this run), and execute. Only configuration loading
/// can error; source unavailability never does.
pub async fn run_pipeline(source_filter: Option<Source>) -> Result<Vec<CanonicalRecord>> {
    let config = fetch::config::load_config_default()?;
    run_pipeline_with_config(&config, source_filter).await
}

pub async fn run_pipeline_with_config(
    config: &FetchConfig,
    source_filter: Option<Source>,
) -> Result<Vec<CanonicalRecord>> {
    let fetchers = fetch::default_fetchers(config);
    Ok(run_with_fetchers(&fetchers, config.deadline, source_filter).await)
}
