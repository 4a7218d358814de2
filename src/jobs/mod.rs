//! Daily snapshot jobs

pub mod context;
pub mod daily;

pub use context::SnapshotContext;
pub use daily::{run_backfill, run_daily_snapshot};
