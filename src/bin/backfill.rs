//! AlphaPilot Historical Backfill
//!
//! One-shot import of historical closes and indicator series into
//! market_daily_metrics. BACKFILL_YEARS controls the range (default 2).

use alphapilot::db::MarketDatabase;
use alphapilot::jobs::{run_backfill, SnapshotContext};
use alphapilot::logging;
use alphapilot::metrics::Metrics;
use alphapilot::notifications::FeishuNotifier;
use alphapilot::services::YahooGateway;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let years: i64 = env::var("BACKFILL_YEARS")
        .ok()
        .and_then(|y| y.parse().ok())
        .unwrap_or(2);

    info!(years = years, "Starting AlphaPilot backfill");

    let metrics = Arc::new(Metrics::new()?);
    let database = MarketDatabase::new()
        .await
        .map_err(|e| format!("backfill requires Postgres: {}", e))?;
    metrics.database_connected.set(1.0);

    let context = SnapshotContext::new(
        Arc::new(YahooGateway::new()),
        Some(Arc::new(database)),
        Some(metrics),
        FeishuNotifier::with_webhook(None),
    );

    let rows = run_backfill(&context, years)
        .await
        .map_err(|e| format!("backfill failed: {}", e))?;
    info!(rows = rows, "Backfill complete");

    Ok(())
}
