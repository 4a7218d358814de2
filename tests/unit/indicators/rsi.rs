//! Unit tests for the RSI indicator

use alphapilot::error::CoreError;
use alphapilot::indicators::momentum::rsi::{rsi, rsi_14};

#[test]
fn insufficient_history_fails() {
    let closes = vec![100.0; 14];
    let err = rsi_14(&closes).unwrap_err();
    match err {
        CoreError::InsufficientHistory { required, actual } => {
            assert_eq!(required, 15);
            assert_eq!(actual, 14);
        }
        other => panic!("expected InsufficientHistory, got {other:?}"),
    }
}

#[test]
fn constant_series_is_neutral() {
    let closes = vec![250.0; 30];
    let value = rsi_14(&closes).unwrap();
    assert_eq!(value, 50.0);
}

#[test]
fn all_gains_saturates_at_100() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    assert_eq!(rsi_14(&closes).unwrap(), 100.0);
}

#[test]
fn all_losses_saturates_at_0() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    assert_eq!(rsi_14(&closes).unwrap(), 0.0);
}

#[test]
fn balanced_gains_and_losses_give_50() {
    // 14 changes alternating +1/-1: average gain equals average loss.
    let mut closes = vec![100.0];
    for i in 0..14 {
        let last = *closes.last().unwrap();
        closes.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
    }
    let value = rsi_14(&closes).unwrap();
    assert!((value - 50.0).abs() < 1e-9, "got {value}");
}

#[test]
fn output_stays_in_range() {
    // Deterministic pseudo-random walk.
    let mut closes = vec![100.0];
    let mut seed: u64 = 42;
    for _ in 0..300 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let step = ((seed >> 33) % 500) as f64 / 100.0 - 2.5;
        let last = *closes.last().unwrap();
        closes.push((last + step).max(1.0));
    }
    for end in 15..closes.len() {
        let value = rsi_14(&closes[..end]).unwrap();
        assert!((0.0..=100.0).contains(&value), "RSI out of range: {value}");
    }
}

#[test]
fn depends_only_on_trailing_window() {
    // Batch and incremental computation must agree: the value is a pure
    // function of the last 15 closes.
    let long: Vec<f64> = (0..100)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
        .collect();
    let tail = &long[long.len() - 15..];
    assert_eq!(rsi_14(&long).unwrap(), rsi_14(tail).unwrap());
}

#[test]
fn custom_period() {
    let closes: Vec<f64> = (0..10).map(|i| 50.0 + i as f64).collect();
    assert_eq!(rsi(&closes, 5).unwrap(), 100.0);
    assert!(rsi(&closes, 10).is_err());
}
