use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use txstats::api::{ApiState, create_router};
use txstats::config::{AppConfig, ENV_SELECTOR};
use txstats::location::LocationGate;
use txstats::observability::{metrics, tracing as obs_tracing};
use txstats::stats::StatsAggregator;
use txstats::utils::clock::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("failed to load configuration")?;

    obs_tracing::init(&config.logging);
    metrics::register_metrics().context("failed to register metrics")?;

    let aggregator = StatsAggregator::new(config.stats.staleness_window()?);
    let state = Arc::new(ApiState::new(aggregator, LocationGate::new(), Arc::new(SystemClock)));
    let app = create_router(state);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        address = %address,
        env = %env,
        staleness_window_secs = config.stats.staleness_window_secs,
        "Stats service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Stats service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
