use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("idea_validator_requests_total", "Total validation requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("idea_validator_rate_limited_total", "Rejected by the ceiling").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter = register_counter!(
        "idea_validator_upstream_failures_total",
        "Failed or empty generation calls"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "idea_validator_request_latency_seconds",
        "Generation latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("idea_validator_tracked_clients", "Distinct client keys tracked").unwrap();
}
