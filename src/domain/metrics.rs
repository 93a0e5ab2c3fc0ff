use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record a completed habit, labelled by carbon category.
    fn record_habit_completed(&self, carbon_type: &str);

    /// Record a successful registration.
    fn record_user_registered(&self);

    /// Record a login attempt and whether it succeeded.
    fn record_login(&self, success: bool);

    /// Record HTTP request duration and labels.
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
