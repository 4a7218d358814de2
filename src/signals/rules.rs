//! The ordered DCA decision list
//!
//! The rule table is an explicit first-match-wins artifact rather than
//! implicit code order. Ordering is load-bearing: the great-buy rule must
//! run before the plain oversold rule (both can hold at once), and severe
//! overbought must run before overvalued.

use crate::models::Signal;

pub struct SignalRule {
    pub name: &'static str,
    pub predicate: fn(rsi_14: f64, ma200_dist_pct: f64) -> bool,
    pub signal: Signal,
}

/// Evaluated top to bottom; the final catch-all always matches.
///
/// Boundary semantics are exact: 35, 30 and 75 sit on the non-matching side
/// of their strict comparisons, while a deviation of exactly 20 is
/// overvalued.
pub const DECISION_LIST: &[SignalRule] = &[
    SignalRule {
        name: "below-ma200-oversold",
        predicate: |rsi, dist| dist < 0.0 && rsi < 35.0,
        signal: Signal::GreatBuy,
    },
    SignalRule {
        name: "oversold",
        predicate: |rsi, _| rsi < 30.0,
        signal: Signal::OversoldBuy,
    },
    SignalRule {
        name: "severe-overbought",
        predicate: |rsi, _| rsi > 75.0,
        signal: Signal::SevereOverbought,
    },
    SignalRule {
        name: "stretched-above-ma200",
        predicate: |_, dist| dist >= 20.0,
        signal: Signal::Overvalued,
    },
    SignalRule {
        name: "default",
        predicate: |_, _| true,
        signal: Signal::NormalDca,
    },
];
