mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{
    increment_habit_completed, increment_login, increment_user_registered, track_http_request,
};
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates a new Prometheus metrics implementation.
///
/// Installs the global recorder on first use and returns a handle that
/// records into it and renders it for the `/metrics` endpoint.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    init_metrics()?;

    Ok(Arc::new(PrometheusMetrics::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metrics;
    use std::time::Instant;

    #[test]
    fn test_create_returns_valid_metrics() {
        let result = create();
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_twice_reuses_recorder() {
        assert!(create().is_ok());
        assert!(create().is_ok());
    }

    #[test]
    fn test_recorded_counters_are_rendered() {
        let metrics = create().unwrap();
        metrics.record_habit_completed("bike_instead_drive");
        metrics.record_login(false);
        metrics.record_http_request(Instant::now(), "/dashboard", "GET", 200);

        let text = metrics.render();
        assert!(text.contains("habit_completions_total"));
        assert!(text.contains("logins_total"));
    }
}
