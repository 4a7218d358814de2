//! Prometheus metrics registry

use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,
    pub fetch_requests_total: IntCounter,
    pub fetch_failures_total: IntCounter,
    pub snapshots_upserted_total: IntCounter,
    pub snapshot_runs_total: IntCounter,
    pub snapshot_run_duration_seconds: Histogram,
    pub database_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            Gauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let fetch_requests_total = IntCounter::new(
            "fetch_requests_total",
            "Price history fetches attempted against the market data gateway",
        )?;
        let fetch_failures_total = IntCounter::new(
            "fetch_failures_total",
            "Price history fetches that failed after retries",
        )?;
        let snapshots_upserted_total = IntCounter::new(
            "snapshots_upserted_total",
            "Daily metric rows written to the store",
        )?;
        let snapshot_runs_total =
            IntCounter::new("snapshot_runs_total", "Completed daily snapshot runs")?;
        let snapshot_run_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "snapshot_run_duration_seconds",
            "Wall time of a daily snapshot run",
        ))?;
        let database_connected =
            Gauge::new("database_connected", "1 when the Postgres store is reachable")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(fetch_requests_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(snapshots_upserted_total.clone()))?;
        registry.register(Box::new(snapshot_runs_total.clone()))?;
        registry.register(Box::new(snapshot_run_duration_seconds.clone()))?;
        registry.register(Box::new(database_connected.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            fetch_requests_total,
            fetch_failures_total,
            snapshots_upserted_total,
            snapshot_runs_total,
            snapshot_run_duration_seconds,
            database_connected,
        })
    }

    /// Prometheus text exposition format for the /metrics endpoint.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}
