//! Prometheus metrics

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder; idempotent
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    if HANDLE.get().is_none() {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = HANDLE.set(handle);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install metrics recorder");
            }
        }
    }
    HANDLE.get()
}

/// Render the current metrics snapshot
pub async fn metrics_handler() -> String {
    HANDLE.get().map(|handle| handle.render()).unwrap_or_default()
}

/// Count one feature request
pub fn record_request(feature: &'static str) {
    metrics::counter!("pharma_assist_requests_total", "feature" => feature).increment(1);
}

/// Count one normalized provider failure
pub fn record_provider_error(feature: &'static str) {
    metrics::counter!("pharma_assist_provider_errors_total", "feature" => feature).increment(1);
}
