pub mod aggregator;

pub use aggregator::{AggregateStats, IngestOutcome, StatsAggregator};
