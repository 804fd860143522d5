// src/aggregate/mod.rs
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalizers;
pub mod types;

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::aggregate::error::AggregateError;
use crate::aggregate::types::{SourceResult, SourceSpec};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("aggregate_requests_total", "Aggregate requests served.");
        describe_counter!(
            "aggregate_source_errors_total",
            "Per-source fetch/normalize failures."
        );
        describe_counter!(
            "aggregate_entries_total",
            "Normalized entries produced across all sources."
        );
        describe_histogram!(
            "aggregate_request_ms",
            "End-to-end aggregate time in milliseconds."
        );
        describe_histogram!("source_fetch_ms", "Single source fetch time in milliseconds.");
    });
}

/// Run one source end to end. Fetch and normalize failures stay inside
/// the returned slot so a broken source never touches its neighbors.
async fn run_source(
    client: &reqwest::Client,
    spec: &SourceSpec,
    timeout: Duration,
) -> SourceResult {
    let body = match fetch::fetch(client, &spec.url, timeout).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url = %spec.url, error = %e, "source fetch failed");
            counter!("aggregate_source_errors_total").increment(1);
            return SourceResult::failed(spec, e.into());
        }
    };

    match normalizers::normalize(spec.kind, &body, &spec.category) {
        Ok(entries) => {
            counter!("aggregate_entries_total").increment(entries.len() as u64);
            SourceResult::ok(spec, entries)
        }
        Err(e) => {
            tracing::warn!(url = %spec.url, error = %e, "source normalize failed");
            counter!("aggregate_source_errors_total").increment(1);
            SourceResult::failed(spec, e.into())
        }
    }
}

/// Fan out one task per configured source, wait for all of them, and
/// return the slots in configuration order regardless of completion
/// order. Only task death escapes as an error; everything a source can
/// do wrong is already folded into its own slot.
pub async fn aggregate(
    client: &reqwest::Client,
    specs: &[SourceSpec],
    timeout: Duration,
) -> Result<Vec<SourceResult>, AggregateError> {
    ensure_metrics_described();
    counter!("aggregate_requests_total").increment(1);
    let t0 = Instant::now();

    // Tasks start running on spawn; awaiting the handles in launch order
    // afterwards keeps slot identity without serializing the work.
    let tasks: Vec<_> = specs
        .iter()
        .cloned()
        .map(|spec| {
            let client = client.clone();
            tokio::spawn(async move { run_source(&client, &spec, timeout).await })
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(task.await?);
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("aggregate_request_ms").record(ms);

    Ok(results)
}
