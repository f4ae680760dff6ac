//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log lines.
    pub service_name: String,

    /// Chain label (e.g. `"cosmos:1"`), empty when the process serves no single chain.
    pub chain_label: String,

    /// Log level filter (trace, debug, info, warn, error) or a full `EnvFilter` directive.
    pub log_level: String,

    /// Whether to write logs to stdout at all.
    pub console_output: bool,

    /// JSON formatted logs instead of the human-readable format.
    pub json_logs: bool,

    /// Prometheus metrics port.
    pub metrics_port: u16,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "crosstalk-gateway".to_string(),
            chain_label: String::new(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_port: 9100,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `XT_SERVICE_NAME`: Service name (default: crosstalk-gateway)
    /// - `XT_CHAIN`: Chain label (default: empty)
    /// - `XT_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `XT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `XT_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `XT_METRICS_PORT`: Prometheus metrics port (default: 9100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("XT_SERVICE_NAME").unwrap_or(defaults.service_name),
            chain_label: lookup("XT_CHAIN").unwrap_or(defaults.chain_label),
            log_level: lookup("XT_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: lookup("XT_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.console_output),
            json_logs: lookup("XT_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),
            metrics_port: lookup("XT_METRICS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.metrics_port),
        }
    }

    /// Configuration for a gateway serving one chain.
    pub fn for_chain(chain_label: &str) -> Self {
        let mut config = Self::from_env();
        config.chain_label = chain_label.to_string();
        config
    }

    /// Service name including the chain label, if any.
    pub fn full_service_name(&self) -> String {
        if self.chain_label.is_empty() {
            self.service_name.clone()
        } else {
            format!("{}@{}", self.service_name, self.chain_label)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
