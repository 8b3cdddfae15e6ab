//! Client metrics
//!
//! Recorded only when observability is enabled on the builder.
//!
//! - `postrpc.client.requests.total`: calls made, by `method` and `status`
//! - `postrpc.client.request.duration`: call latency in seconds
//! - `postrpc.client.errors.total`: failed calls, by `error_type`

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// OpenTelemetry instruments for the client
///
/// One instance is shared by a client and created by
/// [`ClientBuilder::build`](crate::ClientBuilder::build) when observability
/// is enabled. Without a meter provider installed the instruments are no-ops,
/// so recording is always safe.
///
/// # Attributes
///
/// - `method`: the remote method name
/// - `status`: "success" or "error"
/// - `error_type`: [`Error::kind`](postrpc_core::Error::kind) of a failure
///
/// # Examples
///
/// ```rust
/// use postrpc_client::ClientMetrics;
/// use postrpc_core::Error;
///
/// let metrics = ClientMetrics::new("wallet-sync");
/// metrics.record_request("getbalance", "error", 0.012);
/// metrics.record_error(Error::HttpStatus("404 Not Found".into()).kind());
/// ```
pub struct ClientMetrics {
    /// Total number of calls
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create instruments on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create instruments on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("postrpc.client.requests.total")
                .with_description("Total number of calls")
                .build(),
            request_duration: meter
                .f64_histogram("postrpc.client.request.duration")
                .with_description("Call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("postrpc.client.errors.total")
                .with_description("Total number of failed calls")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failure by error kind
    pub fn record_error(&self, error_type: &'static str) {
        self.errors_total
            .add(1, &[KeyValue::new("error_type", error_type)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postrpc_core::Error;

    #[test]
    fn test_metrics_creation() {
        let metrics = ClientMetrics::new("test-client");
        metrics.record_request("getinfo", "success", 0.05);
        metrics.record_request("getinfo", "error", 0.01);
        metrics.record_error("transport");
    }

    #[test]
    fn test_record_error_kinds() {
        let metrics = ClientMetrics::new("test-client-errors");
        let errors = [
            Error::HttpStatus("404 Not Found".into()),
            Error::Correlation {
                expected: 1,
                returned: 2,
            },
            Error::ResultShape("unexpected result shape".into()),
        ];
        for error in &errors {
            metrics.record_error(error.kind());
        }
    }
}
