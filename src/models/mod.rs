//! Shared data models spanning the engine layers.

pub mod market;
pub mod signal;

pub use market::{IndicatorSnapshot, MacroSnapshot, PriceBar};
pub use signal::Signal;
