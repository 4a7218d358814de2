//! Signal classification from indicator values

use crate::error::CoreError;
use crate::models::{IndicatorSnapshot, Signal};
use crate::signals::rules::DECISION_LIST;

/// Map (rsi_14, ma200_dist_pct) to a DCA signal.
///
/// Deterministic and stateless: identical inputs always classify
/// identically. Non-finite input is rejected rather than defaulted.
pub fn classify(rsi_14: f64, ma200_dist_pct: f64) -> Result<Signal, CoreError> {
    if !rsi_14.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "rsi_14 is not a finite number: {rsi_14}"
        )));
    }
    if !ma200_dist_pct.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "ma200_dist_pct is not a finite number: {ma200_dist_pct}"
        )));
    }

    let rule = DECISION_LIST
        .iter()
        .find(|rule| (rule.predicate)(rsi_14, ma200_dist_pct))
        .unwrap_or_else(|| unreachable!("decision list ends with a catch-all"));
    Ok(rule.signal)
}

/// Classify a stored snapshot, or `None` when either indicator is missing.
///
/// Missing data renders as "insufficient data" upstream; no signal is
/// substituted.
pub fn classify_snapshot(snapshot: &IndicatorSnapshot) -> Option<Result<Signal, CoreError>> {
    match (snapshot.rsi_14, snapshot.ma200_dist_pct) {
        (Some(rsi), Some(dist)) => Some(classify(rsi, dist)),
        _ => None,
    }
}
