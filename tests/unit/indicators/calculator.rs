//! Unit tests for the snapshot calculator

use alphapilot::error::CoreError;
use alphapilot::indicators::calculator::{
    compute_latest, compute_latest_partial, compute_series,
};
use alphapilot::models::PriceBar;
use chrono::{Duration, NaiveDate};

fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| PriceBar::new(start + Duration::days(i as i64), "VOO", *close))
        .collect()
}

#[test]
fn constant_series_yields_neutral_snapshot() {
    let bars = bars_from_closes(&vec![100.0; 250]);
    let snapshot = compute_latest(&bars).unwrap();
    assert_eq!(snapshot.ticker, "VOO");
    assert_eq!(snapshot.close, 100.0);
    assert_eq!(snapshot.rsi_14, Some(50.0));
    assert_eq!(snapshot.ma200_dist_pct, Some(0.0));
}

#[test]
fn fourteen_points_is_insufficient() {
    let bars = bars_from_closes(&vec![100.0; 14]);
    let err = compute_latest(&bars).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientHistory { required: 15, .. }
    ));
}

#[test]
fn short_of_ma_window_is_insufficient() {
    let bars = bars_from_closes(&vec![100.0; 100]);
    let err = compute_latest(&bars).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientHistory {
            required: 200,
            actual: 100
        }
    ));
}

#[test]
fn empty_series_is_insufficient() {
    let err = compute_latest(&[]).unwrap_err();
    assert!(matches!(err, CoreError::InsufficientHistory { .. }));
}

#[test]
fn partial_snapshot_degrades_instead_of_failing() {
    let bars = bars_from_closes(&vec![100.0; 50]);
    let snapshot = compute_latest_partial(&bars).unwrap();
    assert_eq!(snapshot.rsi_14, Some(50.0));
    assert_eq!(snapshot.ma200_dist_pct, None);
}

#[test]
fn partial_snapshot_on_empty_series_is_none() {
    assert!(compute_latest_partial(&[]).is_none());
}

#[test]
fn series_starts_at_the_ma_window() {
    let bars = bars_from_closes(&vec![100.0; 260]);
    let series = compute_series(&bars).unwrap();
    assert_eq!(series.len(), 61);
    assert_eq!(series[0].date, bars[199].date);
    assert_eq!(series.last().unwrap().date, bars[259].date);
}

#[test]
fn batch_matches_incremental_recomputation() {
    // Computing the whole series at once must agree with computing the
    // latest snapshot prefix by prefix.
    let closes: Vec<f64> = (0..230)
        .map(|i| 100.0 + (i as f64 * 0.31).sin() * 8.0)
        .collect();
    let bars = bars_from_closes(&closes);
    let series = compute_series(&bars).unwrap();

    for snapshot in &series {
        let index = bars.iter().position(|b| b.date == snapshot.date).unwrap();
        let from_prefix = compute_latest(&bars[..=index]).unwrap();
        assert_eq!(snapshot, &from_prefix);
    }
}

#[test]
fn series_requires_ma_window() {
    let bars = bars_from_closes(&vec![100.0; 150]);
    assert!(compute_series(&bars).is_err());
}
