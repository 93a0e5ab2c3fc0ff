//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. It delegates to utility functions in sibling
//! modules (`counters.rs`, `recorder.rs`) which handle the actual metrics
//! collection via the global `metrics` crate registry.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because all metrics live in the global registry of the `metrics`
/// crate; the global `PrometheusHandle` in `recorder.rs` renders them.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_habit_completed(&self, carbon_type: &str) {
        tracing::debug!("Recording habit completion ({carbon_type})");
        super::increment_habit_completed(carbon_type);
    }

    fn record_user_registered(&self) {
        super::increment_user_registered();
    }

    fn record_login(&self, success: bool) {
        super::increment_login(success);
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
