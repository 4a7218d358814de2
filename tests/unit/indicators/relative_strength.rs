//! Unit tests for relative-strength analytics

use alphapilot::indicators::relative_strength::{
    detect_divergence, latest_ratio, ratio_series, Divergence,
};

#[test]
fn ratio_series_divides_elementwise() {
    let numer = vec![10.0, 20.0, 30.0];
    let denom = vec![2.0, 4.0, 5.0];
    assert_eq!(ratio_series(&numer, &denom), vec![5.0, 5.0, 6.0]);
}

#[test]
fn ratio_series_skips_zero_denominators() {
    let numer = vec![10.0, 20.0];
    let denom = vec![0.0, 4.0];
    assert_eq!(ratio_series(&numer, &denom), vec![5.0]);
}

#[test]
fn latest_ratio_requires_both_sides() {
    assert_eq!(latest_ratio(Some(10.0), Some(4.0)), Some(2.5));
    assert_eq!(latest_ratio(None, Some(4.0)), None);
    assert_eq!(latest_ratio(Some(10.0), None), None);
    assert_eq!(latest_ratio(Some(10.0), Some(0.0)), None);
}

#[test]
fn divergence_fires_when_component_lags_a_new_high() {
    // Benchmark keeps making highs while the component sits still, so the
    // component/benchmark ratio bleeds lower.
    let benchmark: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.5).collect();
    let component = vec![50.0; 30];
    assert_eq!(
        detect_divergence(&benchmark, &component),
        Divergence::MomentumFading
    );
}

#[test]
fn no_divergence_when_component_keeps_pace() {
    let benchmark: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.5).collect();
    let component: Vec<f64> = (0..30).map(|i| 50.0 + i as f64 * 0.25).collect();
    assert_eq!(detect_divergence(&benchmark, &component), Divergence::None);
}

#[test]
fn no_divergence_without_a_new_high() {
    let benchmark = vec![100.0; 30];
    let component = vec![50.0; 30];
    assert_eq!(detect_divergence(&benchmark, &component), Divergence::None);
}

#[test]
fn short_series_never_fires() {
    let benchmark: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let component = vec![50.0; 10];
    assert_eq!(detect_divergence(&benchmark, &component), Divergence::None);
}
