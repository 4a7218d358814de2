//! RSI (Relative Strength Index) indicator

use crate::error::CoreError;

/// Calculate RSI over the trailing `period` price changes.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Gains and losses are simple averages of the last `period` daily changes,
/// so the result is a pure function of the trailing window: streaming new
/// bars and recomputing from full history give identical values.
pub fn rsi(closes: &[f64], period: usize) -> Result<f64, CoreError> {
    if closes.len() < period + 1 {
        return Err(CoreError::insufficient(period + 1, closes.len()));
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    let start = closes.len() - period;
    for i in start..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += change.abs();
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    // Flat window: no gains, no losses. Neither side dominates.
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return Ok(50.0);
    }
    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI with the default 14-day window.
pub fn rsi_14(closes: &[f64]) -> Result<f64, CoreError> {
    rsi(closes, 14)
}
