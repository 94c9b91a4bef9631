use chrono::{DateTime, TimeDelta, Utc};
use crate::error::{Error, Result};
use crate::types::stats::StatsView;
use crate::types::transaction::Transaction;

/// Outcome of a successful ingest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Folded into the running aggregate.
    Admitted,
    /// Older than the staleness window. Accepted, but nothing changed.
    Discarded,
}

/// Running aggregate since the last reset.
///
/// `min` uses 0.0 as its "unset" marker, so a zero amount is never kept as
/// the minimum once a later amount arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AggregateStats {
    pub sum: f64,
    pub count: u64,
    pub max: f64,
    pub min: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

pub struct StatsAggregator {
    stats: AggregateStats,
    staleness_window: TimeDelta,
}

impl StatsAggregator {
    pub fn new(staleness_window: TimeDelta) -> Self {
        StatsAggregator {
            stats: AggregateStats::default(),
            staleness_window,
        }
    }

    pub fn staleness_window(&self) -> TimeDelta {
        self.staleness_window
    }

    /// Raw aggregate, regardless of staleness.
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn ingest(&mut self, tx: &Transaction, now: DateTime<Utc>) -> Result<IngestOutcome> {
        // Step 1: Reject future timestamps before touching state
        if tx.timestamp > now {
            return Err(Error::FutureTimestamp {
                timestamp: tx.timestamp,
                now,
            });
        }

        // Step 2: Too old to matter, but not invalid
        if now - tx.timestamp > self.staleness_window {
            return Ok(IngestOutcome::Discarded);
        }

        // Step 3: Fold into the aggregate
        let stats = &mut self.stats;
        stats.sum += tx.amount;
        stats.count += 1;
        if tx.amount > stats.max {
            stats.max = tx.amount;
        }
        if stats.min == 0.0 || tx.amount < stats.min {
            stats.min = tx.amount;
        }

        // Staleness is measured from admission time, not the event's own timestamp
        stats.last_updated = Some(now);

        Ok(IngestOutcome::Admitted)
    }

    /// Returns `None` when nothing was admitted within the staleness window.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<StatsView> {
        let last_updated = self.stats.last_updated?;
        if now - last_updated > self.staleness_window {
            return None;
        }

        let stats = &self.stats;
        let avg = if stats.count == 0 {
            0.0
        } else {
            stats.sum / stats.count as f64
        };

        Some(StatsView {
            sum: stats.sum,
            avg,
            max: stats.max,
            min: stats.min,
            count: stats.count,
        })
    }

    pub fn reset(&mut self) {
        self.stats = AggregateStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(TimeDelta::seconds(60))
    }

    #[test]
    fn two_transactions_produce_expected_view() {
        let mut agg = aggregator();
        let now = now();

        assert_eq!(agg.ingest(&Transaction::new(100.0, now), now).unwrap(), IngestOutcome::Admitted);
        assert_eq!(agg.ingest(&Transaction::new(50.0, now), now).unwrap(), IngestOutcome::Admitted);

        let view = agg.snapshot(now).unwrap();
        assert_eq!(view, StatsView { sum: 150.0, avg: 75.0, max: 100.0, min: 50.0, count: 2 });
    }

    #[test]
    fn future_timestamp_is_rejected_without_mutation() {
        let mut agg = aggregator();
        let now = now();
        agg.ingest(&Transaction::new(10.0, now), now).unwrap();

        let tx = Transaction::new(99.0, now + TimeDelta::milliseconds(1));
        let err = agg.ingest(&tx, now).unwrap_err();

        assert!(matches!(err, Error::FutureTimestamp { .. }));
        assert_eq!(agg.stats().count, 1);
        assert_eq!(agg.stats().sum, 10.0);
    }

    #[test]
    fn old_transaction_is_discarded_without_mutation() {
        let mut agg = aggregator();
        let now = now();

        let tx = Transaction::new(42.0, now - TimeDelta::seconds(61));
        assert_eq!(agg.ingest(&tx, now).unwrap(), IngestOutcome::Discarded);
        assert_eq!(*agg.stats(), AggregateStats::default());
        assert!(agg.snapshot(now).is_none());
    }

    #[test]
    fn transaction_exactly_at_window_edge_is_admitted() {
        let mut agg = aggregator();
        let now = now();

        let tx = Transaction::new(5.0, now - TimeDelta::seconds(60));
        assert_eq!(agg.ingest(&tx, now).unwrap(), IngestOutcome::Admitted);
    }

    #[test]
    fn last_updated_is_admission_time_not_event_time() {
        let mut agg = aggregator();
        let now = now();

        agg.ingest(&Transaction::new(1.0, now - TimeDelta::seconds(50)), now).unwrap();
        assert_eq!(agg.stats().last_updated, Some(now));

        // 50s after admission the data is still fresh even though the event is 100s old
        assert!(agg.snapshot(now + TimeDelta::seconds(50)).is_some());
    }

    #[test]
    fn snapshot_goes_empty_after_quiet_period() {
        let mut agg = aggregator();
        let now = now();
        agg.ingest(&Transaction::new(7.0, now), now).unwrap();

        assert!(agg.snapshot(now + TimeDelta::seconds(60)).is_some());
        assert!(agg.snapshot(now + TimeDelta::seconds(61)).is_none());

        // Underlying fields are untouched
        assert_eq!(agg.stats().count, 1);
        assert_eq!(agg.stats().sum, 7.0);
    }

    #[test]
    fn reset_returns_to_initial_state_and_is_idempotent() {
        let mut agg = aggregator();
        let now = now();
        agg.ingest(&Transaction::new(3.0, now), now).unwrap();
        agg.ingest(&Transaction::new(-8.0, now), now).unwrap();

        agg.reset();
        let once = *agg.stats();
        agg.reset();

        assert_eq!(once, AggregateStats::default());
        assert_eq!(*agg.stats(), once);
        assert!(agg.snapshot(now).is_none());
    }

    #[test]
    fn fresh_view_with_zero_count_has_zero_average() {
        let mut agg = aggregator();
        let now = now();
        agg.stats.last_updated = Some(now);

        let view = agg.snapshot(now).unwrap();
        assert_eq!(view.count, 0);
        assert_eq!(view.avg, 0.0);
    }

    // Known quirk: 0.0 doubles as "no minimum yet".
    #[test]
    fn zero_amount_is_not_kept_as_minimum() {
        let mut agg = aggregator();
        let now = now();

        agg.ingest(&Transaction::new(0.0, now), now).unwrap();
        agg.ingest(&Transaction::new(5.0, now), now).unwrap();

        assert_eq!(agg.snapshot(now).unwrap().min, 5.0);
    }

    // Known quirk: max starts at 0.0, so an all-negative window reports 0.
    #[test]
    fn all_negative_amounts_report_zero_max() {
        let mut agg = aggregator();
        let now = now();

        agg.ingest(&Transaction::new(-4.0, now), now).unwrap();
        agg.ingest(&Transaction::new(-2.0, now), now).unwrap();

        let view = agg.snapshot(now).unwrap();
        assert_eq!(view.max, 0.0);
        assert_eq!(view.min, -4.0);
    }

    proptest! {
        #[test]
        fn admitted_amounts_fold_into_sum_count_max(
            amounts in prop::collection::vec(1i64..1_000_000, 1..50),
            ages in prop::collection::vec(0i64..=60, 50),
        ) {
            let mut agg = aggregator();
            let now = now();

            for (amount, age) in amounts.iter().zip(ages.iter()) {
                let tx = Transaction::new(*amount as f64, now - TimeDelta::seconds(*age));
                prop_assert_eq!(agg.ingest(&tx, now).unwrap(), IngestOutcome::Admitted);
            }

            let view = agg.snapshot(now).unwrap();
            let sum: i64 = amounts.iter().sum();
            let max = *amounts.iter().max().unwrap();
            let min = *amounts.iter().min().unwrap();

            prop_assert_eq!(view.sum, sum as f64);
            prop_assert_eq!(view.count, amounts.len() as u64);
            prop_assert_eq!(view.max, max as f64);
            prop_assert_eq!(view.min, min as f64);
            prop_assert_eq!(view.avg, sum as f64 / amounts.len() as f64);
        }
    }
}
