use prometheus::{IntCounterVec, Opts};
use service_core::observability::metrics as core_metrics;
use std::sync::OnceLock;

pub static DEAL_SEARCHES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Register the service's own collectors into the shared registry. Call
/// after `service_core::observability::metrics::init_metrics`.
pub fn init_metrics() {
    let searches_total = IntCounterVec::new(
        Opts::new("deal_searches_total", "Deal searches grouped by outcome"),
        &["outcome"],
    )
    .expect("metric can be created");

    core_metrics::register(Box::new(searches_total.clone()));
    let _ = DEAL_SEARCHES_TOTAL.set(searches_total);
}

/// Count one finished search. No-op before `init_metrics`.
pub fn record_search(outcome: &str) {
    if let Some(counter) = DEAL_SEARCHES_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}
