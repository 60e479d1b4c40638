//! HTTP middleware for request metrics and access logging.

use crate::core::metrics::get_metrics;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Metrics middleware for tracking request statistics.
pub struct MetricsMiddleware;

impl MetricsMiddleware {
    /// Track metrics for incoming requests.
    ///
    /// This middleware:
    /// - Increments active request counter
    /// - Measures request duration
    /// - Records request count by status code
    /// - Logs request details
    pub async fn track_metrics(request: Request, next: Next) -> Response {
        let endpoint = request.uri().path().to_string();
        let method = request.method().to_string();

        let metrics = get_metrics();
        metrics
            .active_requests
            .with_label_values(&[&endpoint])
            .inc();

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed().as_secs_f64();
        let status_code = response.status().as_u16().to_string();

        metrics
            .request_count
            .with_label_values(&[&method, &endpoint, &status_code])
            .inc();
        metrics
            .request_duration
            .with_label_values(&[&method, &endpoint])
            .observe(duration);

        tracing::info!(
            "{} {} - status={} duration={:.3}s",
            method,
            endpoint,
            status_code,
            duration
        );

        metrics
            .active_requests
            .with_label_values(&[&endpoint])
            .dec();

        response
    }
}
