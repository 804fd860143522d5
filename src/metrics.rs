use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Prometheus exporter wiring. The recorder is installed once at startup;
/// the handle renders the exposition text for `/metrics`.
pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    pub fn init(configured_sources: usize) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing prometheus recorder")?;

        // Static gauge: size of the configured source list.
        gauge!("aggregate_sources_configured").set(configured_sources as f64);

        Ok(Self { handle })
    }

    /// Router exposing `/metrics`, mergeable into the main app router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(render))
            .with_state(self.handle.clone())
    }
}

async fn render(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
