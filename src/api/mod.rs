mod error;

pub use error::ApiError;

use crate::{
    estimator::ChunkSizeEstimator,
    models::{PredictionInput, PredictionOutput},
};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub type SharedEstimator = Arc<dyn ChunkSizeEstimator>;

pub fn router(estimator: SharedEstimator) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/predict-chunk-size", post(predict_chunk_size))
        .layer(TraceLayer::new_for_http())
        .with_state(estimator)
}

pub async fn serve(bind_addr: &str, estimator: SharedEstimator) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("bind {bind_addr}"))?;
    tracing::info!("API server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(estimator))
        .await
        .context("serve API")?;
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all)]
async fn predict_chunk_size(
    State(estimator): State<SharedEstimator>,
    payload: Result<Json<PredictionInput>, JsonRejection>,
) -> Result<Json<PredictionOutput>, ApiError> {
    let Json(input) = payload?;
    let output = estimator.predict(&input);
    tracing::debug!(
        size_bytes = input.size_bytes,
        bandwidth_mbps = ?input.estimated_bandwidth_mbps,
        latency_ms = ?input.latency_ms,
        chunk_size_mb = output.chunk_size_mb,
        "predicted chunk size"
    );
    Ok(Json(output))
}
