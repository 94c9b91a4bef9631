use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single inbound transaction event. Not retained after aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub amount: f64,
    /// ISO-8601 on the wire; any offset is normalized to UTC.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: f64, timestamp: DateTime<Utc>) -> Self {
        Transaction { amount, timestamp }
    }
}
