//! AlphaPilot Daily Runner
//!
//! Fetches the watchlist, computes indicators, and upserts daily snapshots.
//! Runs once and exits by default (external cron friendly); set
//! SNAPSHOT_CRON to keep it resident on an in-process schedule.

use alphapilot::core::scheduler::SnapshotScheduler;
use alphapilot::db::MarketDatabase;
use alphapilot::jobs::{run_daily_snapshot, SnapshotContext};
use alphapilot::logging;
use alphapilot::metrics::Metrics;
use alphapilot::notifications::FeishuNotifier;
use alphapilot::services::YahooGateway;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env_name = alphapilot::config::get_environment();
    info!("Starting AlphaPilot Daily Runner");
    info!(environment = %env_name, "Environment");

    let metrics = Arc::new(Metrics::new()?);

    let database = match MarketDatabase::new().await {
        Ok(db) => {
            info!("Postgres connected");
            metrics.database_connected.set(1.0);
            Some(Arc::new(db))
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to Postgres - snapshots will not be persisted");
            None
        }
    };

    let context = Arc::new(SnapshotContext::new(
        Arc::new(YahooGateway::new()),
        database,
        Some(metrics),
        FeishuNotifier::from_env(),
    ));

    match env::var("SNAPSHOT_CRON") {
        Ok(cron_expr) if !cron_expr.is_empty() => {
            let scheduler = SnapshotScheduler::new(context, &cron_expr)
                .map_err(|e| format!("scheduler setup failed: {}", e))?;
            scheduler.start().await;
            info!(cron = %cron_expr, "Scheduler running, waiting for shutdown signal...");
            signal::ctrl_c().await?;
            scheduler.stop().await;
            info!("Daily runner stopped");
        }
        _ => {
            run_daily_snapshot(&context)
                .await
                .map_err(|e| format!("daily snapshot failed: {}", e))?;
        }
    }

    Ok(())
}
