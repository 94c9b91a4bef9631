use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    pub staleness_window_secs: u64,
}

impl StatsConfig {
    pub fn staleness_window(&self) -> Result<TimeDelta> {
        if self.staleness_window_secs == 0 {
            return Err(Error::ConfigError("stats.staleness_window_secs must be > 0".into()));
        }

        i64::try_from(self.staleness_window_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| Error::ConfigError(format!(
                "stats.staleness_window_secs out of range: {}",
                self.staleness_window_secs
            )))
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            staleness_window_secs: crate::DEFAULT_STALENESS_WINDOW_SECS,
        }
    }
}
