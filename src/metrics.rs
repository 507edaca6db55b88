use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Safe to call more than once; later calls return the first handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("Global metrics recorder already installed");
            }

            // Pre-register counters so they appear even before the first increment.
            counter!("wallet_fetches_total").absolute(0);
            counter!("wallet_fetch_failures_total").absolute(0);
            counter!("wallet_cache_hits_total").absolute(0);
            counter!("creatures_saved_total").absolute(0);
            counter!("profiles_minted_total").absolute(0);

            // Histogram is lazily created on first record; force creation.
            histogram!("wallet_fetch_latency_seconds").record(0.0);

            handle
        })
        .clone()
}
