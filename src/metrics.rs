use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Only one recorder may exist per
    /// process; a second call fails.
    pub fn init() -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = PrometheusBuilder::new().install_recorder()?;
        describe_all();
        Ok(Self { handle })
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

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(describe_all);
}

fn describe_all() {
    describe_counter!("feed_fetch_total", "News fetches issued, by requested sector.");
    describe_counter!(
        "feed_fetch_failures_total",
        "Remote fetch failures, by error kind."
    );
    describe_counter!("feed_fallback_total", "Fetches served from fallback data.");
    describe_counter!(
        "feed_stale_discarded_total",
        "Fetch results dropped because a newer request superseded them."
    );
    describe_counter!(
        "feed_fetch_task_errors_total",
        "Fetch tasks that panicked or were cancelled."
    );
    describe_histogram!("feed_fetch_ms", "Remote fetch + parse time in milliseconds.");
    describe_gauge!("feed_items_current", "Items in the currently displayed feed.");
}
