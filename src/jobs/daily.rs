//! Daily snapshot and historical backfill jobs

use crate::config::{self, ALERT_TICKERS};
use crate::indicators::calculator::{compute_latest_partial, compute_series, MA_WINDOW};
use crate::indicators::relative_strength::{detect_divergence, Divergence};
use crate::jobs::context::SnapshotContext;
use crate::models::IndicatorSnapshot;
use chrono::{Duration, Utc};
use std::time::Instant;
use tracing::{debug, error, info, warn};

type JobError = Box<dyn std::error::Error + Send + Sync>;

const OVERSOLD_ALERT_RSI: f64 = 30.0;

/// One end-of-day run: fetch a year of history per watchlist ticker, compute
/// the latest indicators, upsert per-asset rows and the macro record, then
/// send one webhook alert covering any oversold core tickers.
pub async fn run_daily_snapshot(ctx: &SnapshotContext) -> Result<(), JobError> {
    let start_time = Instant::now();
    let today = Utc::now().date_naive();
    let history_start = today - Duration::days(365);
    let tickers = config::all_tickers();

    info!(date = %today, ticker_count = tickers.len(), "starting daily snapshot run");

    let mut snapshots: Vec<IndicatorSnapshot> = Vec::with_capacity(tickers.len());
    let mut alerts: Vec<String> = Vec::new();
    let mut qqq_closes: Vec<f64> = Vec::new();
    let mut smh_closes: Vec<f64> = Vec::new();

    for ticker in &tickers {
        if let Some(ref metrics) = ctx.metrics {
            metrics.fetch_requests_total.inc();
        }
        let bars = match ctx
            .gateway
            .fetch_price_history(ticker, history_start, today)
            .await
        {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => {
                warn!(ticker = %ticker, "no bars returned, skipping");
                continue;
            }
            Err(e) => {
                if let Some(ref metrics) = ctx.metrics {
                    metrics.fetch_failures_total.inc();
                }
                error!(ticker = %ticker, error = %e, "price history fetch failed");
                continue;
            }
        };

        match ticker.as_str() {
            "QQQ" => qqq_closes = bars.iter().map(|b| b.close).collect(),
            "SMH" => smh_closes = bars.iter().map(|b| b.close).collect(),
            _ => {}
        }

        let Some(snapshot) = compute_latest_partial(&bars) else {
            continue;
        };

        if let Some(rsi) = snapshot.rsi_14 {
            if rsi < OVERSOLD_ALERT_RSI && ALERT_TICKERS.contains(&ticker.as_str()) {
                alerts.push(format!("🟢 {} RSI 超卖 ({:.1})", ticker, rsi));
            }
        }

        debug!(
            ticker = %ticker,
            date = %snapshot.date,
            rsi = ?snapshot.rsi_14,
            ma200_dist_pct = ?snapshot.ma200_dist_pct,
            "computed snapshot"
        );
        snapshots.push(snapshot);
    }

    // Hardware-vs-index divergence: QQQ printing a fresh high that SMH
    // fails to confirm while the SMH/QQQ ratio rolls over.
    if detect_divergence(&qqq_closes, &smh_closes) == Divergence::MomentumFading {
        warn!("SMH lagging a fresh QQQ high with the ratio turning down");
        alerts.push("⚠️ SMH/QQQ 动能背离：QQQ 创新高而 SMH 滞后".to_string());
    }

    if let Some(ref db) = ctx.database {
        let written = db.upsert_market_daily(&snapshots).await?;
        if let Some(ref metrics) = ctx.metrics {
            metrics.snapshots_upserted_total.inc_by(written);
        }
        info!(rows = written, "upserted market_daily_metrics");
    } else {
        warn!("no database configured, market snapshots not persisted");
    }

    match ctx.gateway.fetch_macro(today).await {
        Ok(macro_snapshot) => {
            if let Some(ref db) = ctx.database {
                db.upsert_macro(&macro_snapshot).await?;
                info!(date = %macro_snapshot.date, "upserted macro_indicators");
            }
        }
        Err(e) => {
            error!(error = %e, "macro snapshot unavailable");
        }
    }

    if alerts.is_empty() {
        info!("no alerts triggered today");
    } else {
        ctx.notifier
            .send_alert("每日收盘监控", &alerts.join("\n"))
            .await;
    }

    if let Some(ref metrics) = ctx.metrics {
        metrics.snapshot_runs_total.inc();
        metrics
            .snapshot_run_duration_seconds
            .observe(start_time.elapsed().as_secs_f64());
    }
    info!(
        snapshots = snapshots.len(),
        alerts = alerts.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "daily snapshot run finished"
    );
    Ok(())
}

/// Backfill historical rows for every watchlist ticker.
///
/// Tickers with at least 200 closes get the full indicator series; shorter
/// series fall back to close-only rows so history is still queryable.
pub async fn run_backfill(ctx: &SnapshotContext, years: i64) -> Result<u64, JobError> {
    let today = Utc::now().date_naive();
    let start = today - Duration::days(365 * years.max(1));
    let tickers = config::all_tickers();

    info!(start = %start, ticker_count = tickers.len(), "starting backfill");

    let Some(ref db) = ctx.database else {
        return Err("backfill requires a database".into());
    };

    let mut total_written = 0;
    for ticker in &tickers {
        let bars = match ctx.gateway.fetch_price_history(ticker, start, today).await {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => {
                warn!(ticker = %ticker, "no history returned, skipping");
                continue;
            }
            Err(e) => {
                error!(ticker = %ticker, error = %e, "history fetch failed, skipping");
                continue;
            }
        };

        let snapshots = match compute_series(&bars) {
            Ok(series) => series,
            Err(_) => {
                warn!(
                    ticker = %ticker,
                    bars = bars.len(),
                    required = MA_WINDOW,
                    "history too short for indicators, storing closes only"
                );
                bars.iter()
                    .map(|bar| IndicatorSnapshot {
                        date: bar.date,
                        ticker: bar.ticker.clone(),
                        close: bar.close,
                        rsi_14: None,
                        ma200_dist_pct: None,
                    })
                    .collect()
            }
        };

        let written = db.upsert_market_daily(&snapshots).await?;
        if let Some(ref metrics) = ctx.metrics {
            metrics.snapshots_upserted_total.inc_by(written);
        }
        info!(ticker = %ticker, rows = written, "backfilled");
        total_written += written;
    }

    info!(rows = total_written, "backfill finished");
    Ok(total_written)
}
