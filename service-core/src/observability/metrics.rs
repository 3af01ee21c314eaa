use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry shared by all collectors in the process.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the registry and the HTTP request collectors.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_metrics() {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("metric can be created");

    let request_duration = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ),
        &["method", "path", "status"],
    )
    .expect("metric can be created");

    registry
        .register(Box::new(requests_total.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(request_duration.clone()))
        .expect("collector can be registered");

    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(request_duration);
}

/// Register an additional collector into the shared registry.
pub fn register(collector: Box<dyn prometheus::core::Collector>) {
    if let Some(registry) = REGISTRY.get() {
        let _ = registry.register(collector);
    }
}

/// Record one completed HTTP request. No-op before `init_metrics`.
pub fn observe_request(method: &str, path: &str, status: &str, duration_seconds: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[method, path, status]).inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path, status])
            .observe(duration_seconds);
    }
}

/// Render all registered metrics in the Prometheus text format.
pub fn render() -> String {
    let Some(registry) = REGISTRY.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_requests_show_up_in_rendered_output() {
        init_metrics();
        observe_request("GET", "/health", "200", 0.003);

        let output = render();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("http_request_duration_seconds"));
    }

    #[test]
    fn observe_before_init_does_not_panic() {
        // OnceLock may already be set by the other test; either way this must not panic.
        observe_request("POST", "/search", "200", 1.5);
    }
}
