//! Prometheus metrics for CrossTalk gateways.
//!
//! All metrics follow the naming convention: `xt_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Outbound requests accepted, by destination chain id
    pub static ref REQUESTS_TO_DEST: CounterVec = CounterVec::new(
        Opts::new("xt_requests_to_dest_total", "Outbound requests sequenced"),
        &["dest_chain_id"]
    ).expect("metric creation failed");

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Inbound batches executed, by source chain id and outcome
    pub static ref REQUESTS_FROM_SOURCE: CounterVec = CounterVec::new(
        Opts::new("xt_requests_from_source_total", "Inbound batches executed"),
        &["src_chain_id", "outcome"]  // outcome: success/failure
    ).expect("metric creation failed");

    /// Individual destination calls that reverted
    pub static ref BATCH_CALL_FAILURES: Counter = Counter::new(
        "xt_batch_call_failures_total",
        "Destination calls that reverted"
    ).expect("metric creation failed");

    /// Acknowledgments recorded on the origin chain
    pub static ref ACKS_PROCESSED: Counter = Counter::new(
        "xt_acks_processed_total",
        "Acknowledgments verified and recorded"
    ).expect("metric creation failed");

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    /// Rejected submissions by reason
    pub static ref VERIFICATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("xt_verification_failures_total", "Submissions rejected before execution"),
        &["reason"]  // reason: invalid_signature/unordered/insufficient_power/stale_valset/...
    ).expect("metric creation failed");

    /// Quorum verification duration
    pub static ref VERIFICATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "xt_verification_duration_seconds",
            "Time spent recovering and checking validator signatures"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])
    ).expect("metric creation failed");

    /// Validator-set updates applied
    pub static ref VALSET_UPDATES: Counter = Counter::new(
        "xt_valset_updates_total",
        "Validator-set updates applied"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(REQUESTS_TO_DEST.clone()),
        Box::new(REQUESTS_FROM_SOURCE.clone()),
        Box::new(BATCH_CALL_FAILURES.clone()),
        Box::new(ACKS_PROCESSED.clone()),
        Box::new(VERIFICATION_FAILURES.clone()),
        Box::new(VERIFICATION_DURATION.clone()),
        Box::new(VALSET_UPDATES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_counter_increment() {
        let before = REQUESTS_TO_DEST.with_label_values(&["2"]).get();
        REQUESTS_TO_DEST.with_label_values(&["2"]).inc();
        assert!(REQUESTS_TO_DEST.with_label_values(&["2"]).get() >= before + 1.0);
    }

    #[test]
    fn test_encode_contains_registered_metric() {
        register_metrics().unwrap();
        VALSET_UPDATES.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("xt_valset_updates_total"));
    }

    #[test]
    fn test_histogram_timer_observes_on_drop() {
        let before = VERIFICATION_DURATION.get_sample_count();
        {
            let _timer = HistogramTimer::new(&VERIFICATION_DURATION);
        }
        assert!(VERIFICATION_DURATION.get_sample_count() > before);
    }
}
