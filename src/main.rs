//! Feed Aggregator — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the route table, shared state, and
//! the Prometheus exporter.

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devfeed_aggregator::aggregate::config::{load_sources_default, ServerConfig};
use devfeed_aggregator::api::{self, AppState};
use devfeed_aggregator::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("devfeed_aggregator=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = ServerConfig::from_env()?;
    let sources = load_sources_default().context("loading source list")?;
    tracing::info!(sources = sources.len(), "loaded source list");

    let metrics = Metrics::init(sources.len())?;

    let state = AppState::new(sources, cfg.fetch_timeout);
    let router = api::create_router(state).merge(metrics.router());

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
