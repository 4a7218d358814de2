//! Simple moving average and price deviation from it

use crate::error::CoreError;

/// Mean of the trailing `window` closes.
pub fn sma(closes: &[f64], window: usize) -> Result<f64, CoreError> {
    if closes.len() < window {
        return Err(CoreError::insufficient(window, closes.len()));
    }
    let tail = &closes[closes.len() - window..];
    Ok(tail.iter().sum::<f64>() / window as f64)
}

/// Percentage deviation of the latest close from the trailing moving average.
///
/// `(close - mean(last window)) / mean(last window) * 100`. Negative when
/// price sits below the average.
pub fn ma_distance_pct(closes: &[f64], window: usize) -> Result<f64, CoreError> {
    let mean = sma(closes, window)?;
    let close = closes[closes.len() - 1];
    Ok((close - mean) / mean * 100.0)
}

/// Deviation from the 200-day moving average, the "bull/bear line".
pub fn ma200_distance_pct(closes: &[f64]) -> Result<f64, CoreError> {
    ma_distance_pct(closes, 200)
}
