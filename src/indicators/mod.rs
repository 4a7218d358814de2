//! Technical indicator calculations.

pub mod calculator;
pub mod premium;
pub mod relative_strength;

pub mod momentum;
pub mod trend;

pub use calculator::{compute_latest, compute_latest_partial, compute_series};
