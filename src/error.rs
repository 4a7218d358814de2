//! Error types for the indicator and signal core

use thiserror::Error;

/// Errors surfaced by the pure core and the market data boundary.
///
/// `InsufficientHistory` and `InvalidInput` are never recovered inside the
/// core: callers decide whether to show "insufficient data" instead of a
/// signal. No default signal is ever substituted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Fewer data points than the indicator window requires.
    #[error("insufficient history: need {required} data points, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Non-finite (NaN/infinite) input reached the signal classifier.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upstream provider failed; retry policy belongs to the gateway.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl CoreError {
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientHistory { required, actual }
    }
}
