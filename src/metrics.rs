//! Prometheus metrics collection for relayd.
//!
//! Metrics are registered once at startup by [`init`]. Until then every
//! recording helper is a no-op, so unit tests and servers with metrics
//! disabled pay nothing.
//!
//! - `relay_connected_clients` - Live transport connections (gauge)
//! - `relay_sessions` - Authenticated sessions (gauge)
//! - `relay_command_total{command}` - Commands processed by keyword
//! - `relay_command_duration_seconds{command}` - Command latency histogram
//! - `relay_command_errors_total{command,error}` - Command errors by code
//! - `relay_broadcast_fanout` - Recipients per broadcast (histogram)
//! - `relay_lines_delivered_total` / `relay_lines_dropped_total`
//! - `relay_sendq_evictions_total` - Clients disconnected for not reading

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Gauges
// ========================================================================

/// Currently connected clients, authenticated or not.
pub static CONNECTED_CLIENTS: OnceLock<IntGauge> = OnceLock::new();

/// Currently authenticated sessions.
pub static SESSIONS: OnceLock<IntGauge> = OnceLock::new();

// ========================================================================
// Counters and histograms
// ========================================================================

/// Commands processed by keyword.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by keyword.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by keyword and error code.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Recipients per broadcast.
pub static BROADCAST_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Lines enqueued for clients.
pub static LINES_DELIVERED: OnceLock<IntCounter> = OnceLock::new();

/// Lines dropped because the recipient queue was full or closed.
pub static LINES_DROPPED: OnceLock<IntCounter> = OnceLock::new();

/// Clients disconnected because their outbound queue filled up.
pub static SENDQ_EVICTIONS: OnceLock<IntCounter> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at server startup before serving `/metrics`.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(CONNECTED_CLIENTS, IntGauge::new("relay_connected_clients", "Currently connected clients"));
    register!(SESSIONS, IntGauge::new("relay_sessions", "Currently authenticated sessions"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("relay_command_total", "Commands processed by keyword"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("relay_command_duration_seconds", "Command latency by keyword")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("relay_command_errors_total", "Command errors by keyword and code"), &["command", "error"]));
    register!(BROADCAST_FANOUT, Histogram::with_opts(
        HistogramOpts::new("relay_broadcast_fanout", "Recipients per broadcast")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0])));
    register!(LINES_DELIVERED, IntCounter::new("relay_lines_delivered_total", "Lines enqueued for clients"));
    register!(LINES_DROPPED, IntCounter::new("relay_lines_dropped_total", "Lines dropped due to full or closed queues"));
    register!(SENDQ_EVICTIONS, IntCounter::new("relay_sendq_evictions_total", "Clients disconnected for SendQ overflow"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record how many sessions a broadcast was addressed to.
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(h) = BROADCAST_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

/// Record the outcome of one delivery plan.
#[inline]
pub fn record_delivery(delivered: usize, dropped: usize) {
    if let Some(c) = LINES_DELIVERED.get() {
        c.inc_by(delivered as u64);
    }
    if let Some(c) = LINES_DROPPED.get() {
        c.inc_by(dropped as u64);
    }
}

/// Record a client disconnected for SendQ overflow.
#[inline]
pub fn record_eviction() {
    if let Some(c) = SENDQ_EVICTIONS.get() {
        c.inc();
    }
}

#[inline]
pub fn set_connected_clients(count: usize) {
    if let Some(g) = CONNECTED_CLIENTS.get() {
        g.set(count as i64);
    }
}

#[inline]
pub fn set_sessions(count: usize) {
    if let Some(g) = SESSIONS.get() {
        g.set(count as i64);
    }
}
