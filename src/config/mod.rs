pub mod logging;
pub mod server;
pub mod stats;
pub mod loader;

pub use loader::AppConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use stats::StatsConfig;

/// Environment variable prefix for config overrides, e.g. `TXSTATS_SERVER__PORT`.
pub const ENV_PREFIX: &str = "TXSTATS";

/// Selects the optional `config/{name}.toml` overlay.
pub const ENV_SELECTOR: &str = "TXSTATS_ENV";
