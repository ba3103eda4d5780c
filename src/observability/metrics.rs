//! Counters for provider, network switch and data client activity.
//!
//! # Metrics
//! - `dapp_provider_requests_total` (counter): by `method`, `outcome`
//! - `dapp_network_switch_total` (counter): by `outcome`
//! - `dapp_data_requests_total` (counter): by `kind`, `source`

use metrics::counter;

/// Record a provider request and whether it succeeded.
pub fn record_provider_request(method: &str, ok: bool) {
    counter!(
        "dapp_provider_requests_total",
        "method" => method.to_string(),
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);
}

/// Record the outcome of a network switch attempt.
pub fn record_network_switch(outcome: &'static str) {
    counter!("dapp_network_switch_total", "outcome" => outcome).increment(1);
}

/// Record a GraphQL operation. `source` is `cache` or `network`.
pub fn record_data_request(kind: &'static str, source: &'static str) {
    counter!("dapp_data_requests_total", "kind" => kind, "source" => source).increment(1);
}
