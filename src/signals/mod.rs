//! Signal derivation interfaces.

pub mod classifier;
pub mod rules;

pub use classifier::{classify, classify_snapshot};
pub use rules::{SignalRule, DECISION_LIST};
