//! Snapshot calculator combining RSI and MA200 deviation
//!
//! Pure functions over an ordered daily close series. No I/O; fetching and
//! persistence live in the services and db layers.

use crate::error::CoreError;
use crate::indicators::momentum::rsi::rsi;
use crate::indicators::trend::sma::ma_distance_pct;
use crate::models::{IndicatorSnapshot, PriceBar};

pub const RSI_WINDOW: usize = 14;
pub const MA_WINDOW: usize = 200;

/// Compute the snapshot for the latest bar.
///
/// Fails with `InsufficientHistory` when the series is shorter than the
/// RSI window (15 points) or the MA window (200 points). Bars must be in
/// ascending date order, one per trading day.
pub fn compute_latest(bars: &[PriceBar]) -> Result<IndicatorSnapshot, CoreError> {
    let latest = bars
        .last()
        .ok_or_else(|| CoreError::insufficient(RSI_WINDOW + 1, 0))?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let rsi_14 = rsi(&closes, RSI_WINDOW)?;
    let ma200_dist_pct = ma_distance_pct(&closes, MA_WINDOW)?;

    Ok(IndicatorSnapshot {
        date: latest.date,
        ticker: latest.ticker.clone(),
        close: latest.close,
        rsi_14: Some(rsi_14),
        ma200_dist_pct: Some(ma200_dist_pct),
    })
}

/// Like `compute_latest`, but indicator fields degrade to `None` instead of
/// failing when history is short. The daily job uses this so a young series
/// still gets its close persisted.
pub fn compute_latest_partial(bars: &[PriceBar]) -> Option<IndicatorSnapshot> {
    let latest = bars.last()?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    Some(IndicatorSnapshot {
        date: latest.date,
        ticker: latest.ticker.clone(),
        close: latest.close,
        rsi_14: rsi(&closes, RSI_WINDOW).ok(),
        ma200_dist_pct: ma_distance_pct(&closes, MA_WINDOW).ok(),
    })
}

/// Compute snapshots for every date with enough history for both windows.
///
/// Each snapshot depends only on its trailing window, so this batch result
/// matches what incremental recomputation would have produced day by day.
pub fn compute_series(bars: &[PriceBar]) -> Result<Vec<IndicatorSnapshot>, CoreError> {
    if bars.len() < MA_WINDOW {
        return Err(CoreError::insufficient(MA_WINDOW, bars.len()));
    }
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let mut snapshots = Vec::with_capacity(bars.len() - MA_WINDOW + 1);
    for i in (MA_WINDOW - 1)..bars.len() {
        let window = &closes[..=i];
        snapshots.push(IndicatorSnapshot {
            date: bars[i].date,
            ticker: bars[i].ticker.clone(),
            close: bars[i].close,
            rsi_14: Some(rsi(window, RSI_WINDOW)?),
            ma200_dist_pct: Some(ma_distance_pct(window, MA_WINDOW)?),
        });
    }
    Ok(snapshots)
}
