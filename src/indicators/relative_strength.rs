//! Relative-strength ratio and divergence detection
//!
//! Used for the SOXX/QQQ and XLP/XLY ratio columns and the
//! hardware-vs-index divergence warning.

/// How many trailing sessions the new-high check looks back over.
pub const DIVERGENCE_LOOKBACK: usize = 20;

/// Sessions averaged when checking whether the ratio is turning down.
const TURN_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    None,
    /// Benchmark made a fresh high while the ratio leg lagged and the ratio
    /// slope turned negative.
    MomentumFading,
}

/// Element-wise ratio of two aligned close series.
///
/// Series must already be aligned by date; the shorter length wins.
pub fn ratio_series(numerator: &[f64], denominator: &[f64]) -> Vec<f64> {
    numerator
        .iter()
        .zip(denominator.iter())
        .filter(|(_, d)| **d != 0.0)
        .map(|(n, d)| n / d)
        .collect()
}

/// Detect a top divergence between a benchmark and a leading component.
///
/// Fires when the benchmark closes above its prior 20-session high, the
/// component does not, and the component/benchmark ratio's mean change over
/// the last 3 sessions is negative.
pub fn detect_divergence(benchmark: &[f64], component: &[f64]) -> Divergence {
    let n = benchmark.len().min(component.len());
    if n <= DIVERGENCE_LOOKBACK + 1 {
        return Divergence::None;
    }
    let benchmark = &benchmark[benchmark.len() - n..];
    let component = &component[component.len() - n..];
    let ratio = ratio_series(component, benchmark);
    if ratio.len() <= TURN_WINDOW {
        return Divergence::None;
    }

    let bench_last = benchmark[n - 1];
    let comp_last = component[n - 1];
    let bench_prior_high = benchmark[n - 1 - DIVERGENCE_LOOKBACK..n - 1]
        .iter()
        .cloned()
        .fold(f64::MIN, f64::max);
    let comp_prior_high = component[n - 1 - DIVERGENCE_LOOKBACK..n - 1]
        .iter()
        .cloned()
        .fold(f64::MIN, f64::max);

    let bench_new_high = bench_last > bench_prior_high;
    let comp_new_high = comp_last > comp_prior_high;

    let turn_sum: f64 = ratio
        .windows(2)
        .rev()
        .take(TURN_WINDOW)
        .map(|w| w[1] - w[0])
        .sum();
    let ratio_turning_down = turn_sum / (TURN_WINDOW as f64) < 0.0;

    if bench_new_high && !comp_new_high && ratio_turning_down {
        Divergence::MomentumFading
    } else {
        Divergence::None
    }
}

/// Ratio of the latest closes of two series, for the macro snapshot columns.
pub fn latest_ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}
