//! Prometheus scrape endpoint.
//!
//! The listener is bound during startup, on the same interface as the relay
//! listener, so a port clash stops the daemon instead of failing quietly in
//! a background task. Serving then runs on its own task.

use axum::{Router, http::header, response::IntoResponse, routing::get};
use prometheus::{Encoder, TextEncoder};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

/// GET /metrics in Prometheus text exposition format.
async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
        crate::metrics::gather_metrics(),
    )
}

fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Bind the metrics listener on `ip:port`.
pub async fn bind_metrics(ip: IpAddr, port: u16) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::new(ip, port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(%addr, error = %e, "Failed to bind metrics listener");
        anyhow::Error::from(e).context(format!("metrics listener on {addr}"))
    })?;
    tracing::info!(%addr, "Metrics listener bound");
    Ok(listener)
}

/// Serve `/metrics` until the listener fails.
pub async fn serve_metrics(listener: TcpListener) {
    if let Err(e) = axum::serve(listener, metrics_router()).await {
        tracing::error!(error = %e, "Metrics HTTP server error");
    }
}
