use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tower_http::cors::CorsLayer;

use crate::aggregate;
use crate::aggregate::types::{SourceResult, SourceSpec};

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    sources: Arc<Vec<SourceSpec>>,
    fetch_timeout: Duration,
}

impl AppState {
    pub fn new(sources: Vec<SourceSpec>, fetch_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            sources: Arc::new(sources),
            fetch_timeout,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(aggregate_all))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The single public endpoint: fan out over every configured source and
/// reply with one slot per source, in configuration order.
async fn aggregate_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<SourceResult>>, (StatusCode, String)> {
    let t0 = Instant::now();

    let results = aggregate::aggregate(&state.client, &state.sources, state.fetch_timeout)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "aggregate failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    tracing::info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        sources = results.len(),
        failed,
        "aggregate complete"
    );

    Ok(Json(results))
}
