// src/infrastructure/metrics/noop/mod.rs
use crate::domain::{Metrics, MetricsPtr};
use std::sync::Arc;
use std::time::Instant;

/// Backend selected when `GREEN_METRICS_TYPE` is not `prom`: every
/// recording is dropped and `/metrics` serves an empty body.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn record_habit_completed(&self, _: &str) {}
    fn record_user_registered(&self) {}
    fn record_login(&self, _: bool) {}
    fn record_http_request(&self, _: Instant, _: &str, _: &str, _: u16) {}
}

pub fn create() -> anyhow::Result<MetricsPtr> {
    Ok(Arc::new(NoopMetrics))
}
