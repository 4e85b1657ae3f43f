use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and register series names.
    pub fn init() -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        ensure_metrics_described();

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Gauge mirroring the feature count of the live dataset. Reset after every
/// successful load or reload.
pub fn record_network_features(count: usize) {
    gauge!("network_features").set(count as f64);
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "score_requests_total",
            "Scored network responses served."
        );
        describe_counter!(
            "weight_revisions_total",
            "Weight revisions applied via the API."
        );
        describe_histogram!("score_pass_ms", "Full two-pass rescore time in milliseconds.");
        describe_gauge!(
            "network_features",
            "Feature count of the live base dataset."
        );
    });
}
