use axum::{
    Router,
    routing::{get, post, delete},
    extract::{Json, State},
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use crate::error::{Error, Result};
use crate::location::LocationGate;
use crate::observability::metrics;
use crate::observability::tracing::{trace_ingest, trace_location_update, trace_statistics_read};
use crate::stats::{IngestOutcome, StatsAggregator};
use crate::types::location::Location;
use crate::types::transaction::Transaction;
use crate::utils::clock::Clock;

/// Shared state handed to every handler.
///
/// Lock order: `location` before `stats`. Only the statistics read holds both.
pub struct ApiState {
    pub stats: Arc<RwLock<StatsAggregator>>,
    pub location: Arc<RwLock<LocationGate>>,
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(aggregator: StatsAggregator, gate: LocationGate, clock: Arc<dyn Clock>) -> Self {
        ApiState {
            stats: Arc::new(RwLock::new(aggregator)),
            location: Arc::new(RwLock::new(gate)),
            clock,
        }
    }
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(export_metrics))
        .route("/transactions", post(ingest_transaction))
        .route("/statistics", get(get_statistics))
        .route("/reset", delete(reset_statistics))
        .route("/location", post(set_location))
        .route("/location/reset", delete(reset_location))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decodes a JSON body regardless of content type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::InvalidPayload(e.to_string()))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn export_metrics() -> Result<Response> {
    let body = metrics::gather_text()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response())
}

async fn ingest_transaction(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<StatusCode> {
    let tx: Transaction = parse_body(&body)?;

    async move {
        let started = Instant::now();
        let outcome = {
            let mut stats = state.stats.write().await;
            let outcome = stats.ingest(&tx, state.clock.now());
            metrics::WINDOW_TRANSACTION_COUNT.set(stats.stats().count as i64);
            outcome
        };
        metrics::INGEST_LATENCY.observe(started.elapsed().as_secs_f64());

        match outcome {
            Ok(IngestOutcome::Admitted) => {
                metrics::TRANSACTIONS_ADMITTED.inc();
                tracing::debug!("Transaction admitted");
                Ok(StatusCode::CREATED)
            }
            Ok(IngestOutcome::Discarded) => {
                metrics::TRANSACTIONS_DISCARDED.inc();
                tracing::debug!("Transaction older than staleness window, discarded");
                Ok(StatusCode::NO_CONTENT)
            }
            Err(e) => {
                metrics::TRANSACTIONS_REJECTED.inc();
                tracing::warn!("Transaction rejected: {}", e);
                Err(e)
            }
        }
    }
    .instrument(trace_ingest(&tx))
    .await
}

async fn get_statistics(State(state): State<Arc<ApiState>>) -> Result<Response> {
    async move {
        let location = state.location.read().await;
        if !location.is_authorized() {
            metrics::STATISTICS_UNAUTHORIZED.inc();
            tracing::info!("Statistics read blocked for location {:?}", location.location().city);
            return Err(Error::Unauthorized);
        }

        let stats = state.stats.read().await;
        metrics::STATISTICS_READS.inc();

        let response = match stats.snapshot(state.clock.now()) {
            Some(view) => Json(view).into_response(),
            None => Json(serde_json::json!({})).into_response(),
        };
        Ok(response)
    }
    .instrument(trace_statistics_read())
    .await
}

async fn reset_statistics(State(state): State<Arc<ApiState>>) -> StatusCode {
    {
        let mut stats = state.stats.write().await;
        stats.reset();
        metrics::WINDOW_TRANSACTION_COUNT.set(0);
    }
    metrics::STATS_RESETS.inc();
    tracing::info!("Statistics reset");

    StatusCode::NO_CONTENT
}

async fn set_location(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<StatusCode> {
    let location: Location = parse_body(&body)?;
    let span = trace_location_update(&location.city);

    async move {
        state.location.write().await.set(location);
        metrics::LOCATION_UPDATES.inc();
        tracing::info!("Location set");
    }
    .instrument(span)
    .await;

    Ok(StatusCode::NO_CONTENT)
}

async fn reset_location(State(state): State<Arc<ApiState>>) -> StatusCode {
    state.location.write().await.reset();
    metrics::LOCATION_UPDATES.inc();
    tracing::info!("Location reset");

    StatusCode::NO_CONTENT
}
