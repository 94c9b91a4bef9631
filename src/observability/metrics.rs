use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};
use crate::error::{Error, Result};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Transaction metrics
    pub static ref TRANSACTIONS_ADMITTED: IntCounter = IntCounter::new(
        "transactions_admitted_total",
        "Total number of transactions folded into the aggregate"
    ).expect("valid metric definition");

    pub static ref TRANSACTIONS_DISCARDED: IntCounter = IntCounter::new(
        "transactions_discarded_total",
        "Total number of transactions accepted but older than the staleness window"
    ).expect("valid metric definition");

    pub static ref TRANSACTIONS_REJECTED: IntCounter = IntCounter::new(
        "transactions_rejected_total",
        "Total number of transactions rejected for a future timestamp"
    ).expect("valid metric definition");

    pub static ref WINDOW_TRANSACTION_COUNT: IntGauge = IntGauge::new(
        "window_transaction_count",
        "Transactions admitted since the last reset"
    ).expect("valid metric definition");

    // Read metrics
    pub static ref STATISTICS_READS: IntCounter = IntCounter::new(
        "statistics_reads_total",
        "Total number of statistics reads served"
    ).expect("valid metric definition");

    pub static ref STATISTICS_UNAUTHORIZED: IntCounter = IntCounter::new(
        "statistics_unauthorized_total",
        "Total number of statistics reads blocked by the location gate"
    ).expect("valid metric definition");

    // Admin metrics
    pub static ref STATS_RESETS: IntCounter = IntCounter::new(
        "stats_resets_total",
        "Total number of statistics resets"
    ).expect("valid metric definition");

    pub static ref LOCATION_UPDATES: IntCounter = IntCounter::new(
        "location_updates_total",
        "Total number of location sets and resets"
    ).expect("valid metric definition");

    // Latency metrics
    pub static ref INGEST_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ingest_latency_seconds",
            "Time spent inside the stats write lock per ingest"
        ).buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1])
    ).expect("valid metric definition");
}

pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(TRANSACTIONS_ADMITTED.clone()))?;
    REGISTRY.register(Box::new(TRANSACTIONS_DISCARDED.clone()))?;
    REGISTRY.register(Box::new(TRANSACTIONS_REJECTED.clone()))?;
    REGISTRY.register(Box::new(WINDOW_TRANSACTION_COUNT.clone()))?;
    REGISTRY.register(Box::new(STATISTICS_READS.clone()))?;
    REGISTRY.register(Box::new(STATISTICS_UNAUTHORIZED.clone()))?;
    REGISTRY.register(Box::new(STATS_RESETS.clone()))?;
    REGISTRY.register(Box::new(LOCATION_UPDATES.clone()))?;
    REGISTRY.register(Box::new(INGEST_LATENCY.clone()))?;
    Ok(())
}

/// Renders the registry in the Prometheus text exposition format.
pub fn gather_text() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| Error::MetricsError(prometheus::Error::Msg(e.to_string())))
}
