//! Prometheus metrics for monitoring the Gemini gateway.

use prometheus::{
    register_gauge_vec, register_histogram_vec, register_int_counter_vec, GaugeVec, HistogramVec,
    IntCounterVec,
};
use std::sync::OnceLock;

/// Container for all application metrics.
pub struct Metrics {
    /// Total number of requests by method, endpoint, and status
    pub request_count: IntCounterVec,

    /// Request duration histogram in seconds
    pub request_duration: HistogramVec,

    /// Number of currently active requests by endpoint
    pub active_requests: GaugeVec,

    /// Upstream calls by gateway and outcome (success, upstream_error, transport_error)
    pub upstream_requests: IntCounterVec,

    /// Upstream response latency histogram in seconds
    pub upstream_latency: HistogramVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Initialize the metrics registry.
///
/// Safe to call more than once; later calls return the same instance.
pub fn init_metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let request_count = register_int_counter_vec!(
            "gemini_gateway_requests_total",
            "Total number of requests",
            &["method", "endpoint", "status_code"]
        )
        .expect("Failed to register request_count metric");

        let request_duration = register_histogram_vec!(
            "gemini_gateway_request_duration_seconds",
            "Request duration in seconds",
            &["method", "endpoint"],
            vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]
        )
        .expect("Failed to register request_duration metric");

        let active_requests = register_gauge_vec!(
            "gemini_gateway_active_requests",
            "Number of active requests",
            &["endpoint"]
        )
        .expect("Failed to register active_requests metric");

        let upstream_requests = register_int_counter_vec!(
            "gemini_gateway_upstream_requests_total",
            "Total number of upstream generateContent calls",
            &["gateway", "outcome"]
        )
        .expect("Failed to register upstream_requests metric");

        let upstream_latency = register_histogram_vec!(
            "gemini_gateway_upstream_latency_seconds",
            "Upstream response latency in seconds",
            &["gateway"],
            vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
        )
        .expect("Failed to register upstream_latency metric");

        Metrics {
            request_count,
            request_duration,
            active_requests,
            upstream_requests,
            upstream_latency,
        }
    })
}

/// Get the global metrics instance, registering it on first use.
pub fn get_metrics() -> &'static Metrics {
    init_metrics()
}
