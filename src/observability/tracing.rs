use tracing::Span;
use tracing_subscriber::EnvFilter;
use crate::config::LoggingConfig;
use crate::types::transaction::Transaction;

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub fn trace_ingest(tx: &Transaction) -> Span {
    tracing::info_span!(
        "ingest",
        amount = tx.amount,
        timestamp = %tx.timestamp,
    )
}

pub fn trace_statistics_read() -> Span {
    tracing::info_span!("statistics_read")
}

pub fn trace_location_update(city: &str) -> Span {
    tracing::info_span!(
        "location_update",
        city = %city,
    )
}
