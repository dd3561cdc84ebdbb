use axum::{routing::get, Router};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and describe the counters the
    /// pipeline emits.
    pub fn init() -> Self {
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        describe_counter!(
            "analyses_total",
            "Symptom analyses served, labeled by strategy (ai|rules)"
        );
        describe_counter!(
            "ai_fallbacks_total",
            "AI attempts that fell forward to the rule engine"
        );
        describe_counter!(
            "directory_lookup_failures_total",
            "Doctor directory lookups that degraded to a fallback"
        );

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
