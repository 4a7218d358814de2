//! HTTP endpoint server using Axum
//!
//! Serves the presentation layer: summary table with derived signals, per
//! ticker history, and macro indicators. Signals are computed per request
//! and never read from storage.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::TARGET_ETFS;
use crate::db::MarketDatabase;
use crate::metrics::Metrics;
use crate::models::IndicatorSnapshot;
use crate::signals::classifier::classify_snapshot;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub database: Option<Arc<MarketDatabase>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "alphapilot-dashboard-core"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    start: Option<NaiveDate>,
}

/// One row of the asset health table. `signal`/`action` stay null when the
/// stored row lacks indicators ("insufficient data"), never defaulted.
#[derive(Debug, Serialize)]
struct SummaryRow {
    ticker: String,
    date: NaiveDate,
    close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rsi_14: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ma200_dist_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl From<IndicatorSnapshot> for SummaryRow {
    fn from(snapshot: IndicatorSnapshot) -> Self {
        let (signal, action) = match classify_snapshot(&snapshot) {
            Some(Ok(signal)) => (Some(signal.to_string()), Some(signal.action().to_string())),
            Some(Err(e)) => {
                // Bad stored value; this row renders without a signal.
                error!(ticker = %snapshot.ticker, error = %e, "classification failed");
                (None, None)
            }
            None => (None, None),
        };
        Self {
            ticker: snapshot.ticker,
            date: snapshot.date,
            close: snapshot.close,
            rsi_14: snapshot.rsi_14,
            ma200_dist_pct: snapshot.ma200_dist_pct,
            signal,
            action,
        }
    }
}

/// Latest snapshot per watchlist ticker with its derived signal.
async fn get_summary(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let db = state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let tickers: Vec<String> = TARGET_ETFS.iter().map(|t| t.to_string()).collect();
    let snapshots = db.fetch_latest_market(&tickers).await.map_err(|e| {
        error!(error = %e, "Failed to load summary snapshots");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let rows: Vec<SummaryRow> = snapshots.into_iter().map(Into::into).collect();
    Ok(Json(json!(rows)))
}

/// Snapshot history for one ticker.
async fn get_market_history(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Value>, StatusCode> {
    let db = state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let snapshots = db
        .fetch_market_daily(&[ticker.clone()], params.start)
        .await
        .map_err(|e| {
            error!(error = %e, ticker = %ticker, "Failed to load market history");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if snapshots.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!(snapshots)))
}

/// Macro indicator history.
async fn get_macro_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Value>, StatusCode> {
    let db = state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let snapshots = db.fetch_macro(params.start).await.map_err(|e| {
        error!(error = %e, "Failed to load macro history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(json!(snapshots)))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/summary", get(get_summary))
        .route("/api/market/{ticker}", get(get_market_history))
        .route("/api/macro", get(get_macro_history))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    // The API works without a database, but data endpoints return 503.
    let database = match MarketDatabase::new().await {
        Ok(db) => {
            info!("Postgres connected for API server");
            metrics.database_connected.set(1.0);
            Some(Arc::new(db))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Postgres - data endpoints will be unavailable");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        database,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
