//! Job context for dependency injection

use crate::db::MarketDatabase;
use crate::metrics::Metrics;
use crate::notifications::FeishuNotifier;
use crate::services::market_data::MarketDataGateway;
use std::sync::Arc;

/// Context passed to the snapshot and backfill jobs.
///
/// The gateway is the only hard requirement; without a database the jobs
/// still fetch and compute but skip persistence, and without metrics they
/// just don't record counters.
pub struct SnapshotContext {
    pub gateway: Arc<dyn MarketDataGateway>,
    pub database: Option<Arc<MarketDatabase>>,
    pub metrics: Option<Arc<Metrics>>,
    pub notifier: FeishuNotifier,
}

impl SnapshotContext {
    pub fn new(
        gateway: Arc<dyn MarketDataGateway>,
        database: Option<Arc<MarketDatabase>>,
        metrics: Option<Arc<Metrics>>,
        notifier: FeishuNotifier,
    ) -> Self {
        Self {
            gateway,
            database,
            metrics,
            notifier,
        }
    }
}
