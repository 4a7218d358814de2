//! Unit tests for the moving-average deviation

use alphapilot::error::CoreError;
use alphapilot::indicators::trend::sma::{ma200_distance_pct, ma_distance_pct, sma};

#[test]
fn sma_of_constant_series() {
    let closes = vec![42.0; 200];
    assert_eq!(sma(&closes, 200).unwrap(), 42.0);
}

#[test]
fn sma_uses_trailing_window_only() {
    let mut closes = vec![1000.0; 50];
    closes.extend(vec![10.0; 4]);
    assert_eq!(sma(&closes, 4).unwrap(), 10.0);
}

#[test]
fn distance_is_zero_on_the_average() {
    let closes = vec![100.0; 200];
    assert_eq!(ma200_distance_pct(&closes).unwrap(), 0.0);
}

#[test]
fn distance_is_percentage_above_mean() {
    // mean(1,2,3,4) = 2.5, close 4 -> +60%
    let closes = vec![1.0, 2.0, 3.0, 4.0];
    let dist = ma_distance_pct(&closes, 4).unwrap();
    assert!((dist - 60.0).abs() < 1e-9, "got {dist}");
}

#[test]
fn distance_is_negative_below_mean() {
    // mean(4,3,2,1) = 2.5, close 1 -> -60%
    let closes = vec![4.0, 3.0, 2.0, 1.0];
    let dist = ma_distance_pct(&closes, 4).unwrap();
    assert!((dist + 60.0).abs() < 1e-9, "got {dist}");
}

#[test]
fn insufficient_history_fails() {
    let closes = vec![100.0; 199];
    let err = ma200_distance_pct(&closes).unwrap_err();
    match err {
        CoreError::InsufficientHistory { required, actual } => {
            assert_eq!(required, 200);
            assert_eq!(actual, 199);
        }
        other => panic!("expected InsufficientHistory, got {other:?}"),
    }
}
