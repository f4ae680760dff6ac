//! # CrossTalk Telemetry
//!
//! Logging and metrics shared by gateways, tools and the test-suite.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xt_telemetry::{init_logging, register_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_chain("cosmos:1");
//! init_logging(&config)?;
//! register_metrics()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XT_SERVICE_NAME` | `crosstalk-gateway` | Service name in log lines |
//! | `XT_CHAIN` | (empty) | Chain label |
//! | `XT_LOG_LEVEL` | `info` | Log level filter |
//! | `XT_JSON_LOGS` | `false` | JSON log output |
//! | `XT_METRICS_PORT` | `9100` | Prometheus scrape port |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ACKS_PROCESSED, BATCH_CALL_FAILURES,
    REQUESTS_FROM_SOURCE, REQUESTS_TO_DEST, VALSET_UPDATES, VERIFICATION_DURATION,
    VERIFICATION_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration could not be interpreted.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
