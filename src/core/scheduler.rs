//! Cron-based scheduler for the daily snapshot job

use crate::jobs::context::SnapshotContext;
use crate::jobs::daily::run_daily_snapshot;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Runs the snapshot job in-process on a cron schedule.
///
/// The original deployment triggered the daily run from an external cron;
/// this keeps the same cadence available without one.
pub struct SnapshotScheduler {
    context: Arc<SnapshotContext>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl SnapshotScheduler {
    /// `cron_expr` uses six-field cron syntax (second minute hour day month
    /// weekday), e.g. `"0 30 21 * * Mon-Fri"` for 21:30 UTC on weekdays.
    pub fn new(
        context: Arc<SnapshotContext>,
        cron_expr: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(cron = %cron_expr, "SnapshotScheduler: created");

        Ok(Self {
            context,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn start(&self) {
        let context = self.context.clone();
        let schedule = self.schedule.clone();
        let handle_arc = self.handle.clone();

        let handle = tokio::spawn(async move {
            info!("SnapshotScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                info!("SnapshotScheduler: cron tick, running daily snapshot");
                if let Err(e) = run_daily_snapshot(&context).await {
                    error!(error = %e, "SnapshotScheduler: daily snapshot failed");
                }
            }
        });

        {
            let mut h = handle_arc.write().await;
            *h = Some(handle);
        }

        info!("SnapshotScheduler: started successfully");
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("SnapshotScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
