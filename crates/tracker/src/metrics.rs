use metrics::{describe_counter, describe_histogram};

pub fn describe() {
    describe_counter!(
        "tracker_api_requests_total",
        "Explorer and price API requests, by endpoint and status."
    );
    describe_counter!(
        "tracker_api_errors_total",
        "Failed API requests, by endpoint and error kind."
    );
    describe_histogram!(
        "tracker_api_latency_ms",
        "API request latency in milliseconds, by endpoint."
    );
    describe_counter!(
        "tracker_price_fallback_total",
        "Runs that used the configured fallback price."
    );
    describe_counter!(
        "tracker_wallets_aggregated_total",
        "Wallets fully aggregated."
    );
    describe_counter!("tracing_error_events", "ERROR-level log events.");
}
