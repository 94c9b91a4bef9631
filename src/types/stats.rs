use serde::{Deserialize, Serialize};

/// Point-in-time copy of the running aggregate, as returned to readers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StatsView {
    pub sum: f64,
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    pub count: u64,
}
