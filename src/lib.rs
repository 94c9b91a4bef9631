pub mod api;
pub mod config;
pub mod error;
pub mod location;
pub mod observability;
pub mod stats;
pub mod types;
pub mod utils;

// Default staleness window, in seconds
pub const DEFAULT_STALENESS_WINDOW_SECS: u64 = 60;
