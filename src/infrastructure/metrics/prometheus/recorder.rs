use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus recorder globally and store the handle.
///
/// The recorder is process-wide; later calls reuse the installed one.
pub fn init_metrics() -> Result<()> {
    // ---
    if HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    // Lost a race with another initializer: theirs is installed, keep it.
    let _ = HANDLE.set(handle);
    Ok(())
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    // ---
    HANDLE.get().map(PrometheusHandle::render).unwrap_or_default()
}
