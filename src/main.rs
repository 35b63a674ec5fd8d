//! relayd - line-based chat relay.
//!
//! Clients claim a display name with `LOGIN`, then broadcast with `MSG`,
//! message one peer with `DM`, list peers with `WHO` and check liveness
//! with `PING`.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod network;
mod state;
mod telemetry;

use crate::config::Config;
use crate::handlers::Router;
use crate::network::Gateway;
use crate::state::Hub;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration: first argument is a config path or a bare port.
    let arg = std::env::args().nth(1);
    let env_port = std::env::var("PORT").ok();

    let config = Config::resolve(arg.as_deref(), env_port.as_deref()).map_err(|e| {
        error!(arg = ?arg, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validation::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        listen = %config.listen.address,
        "Starting relayd"
    );

    // Prometheus metrics are optional; absent or 0 disables the endpoint.
    match config.server.metrics_port {
        Some(port) if port != 0 => {
            metrics::init();
            let listener = http::bind_metrics(config.listen.address.ip(), port).await?;
            tokio::spawn(http::serve_metrics(listener));
            info!(port, "Prometheus HTTP server started");
        }
        _ => info!("Metrics disabled"),
    }

    let hub = Arc::new(Hub::new(&config));
    let router = Arc::new(Router::new());

    let gateway = Gateway::bind(
        config.listen.address,
        Arc::clone(&hub),
        Arc::clone(&router),
        config.limits.max_line_len,
    )
    .await?;

    tokio::select! {
        result = gateway.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!(
                connections = hub.connection_count(),
                sessions = hub.registry.len(),
                commands = ?router.get_command_stats(),
                "Shutting down"
            );
        }
    }

    Ok(())
}
