//! Trace Export Config

use std::time::Duration;

use clap::{ArgAction, Args};

/// OpenTelemetry trace export. Off unless `OTEL_ENABLED=true`.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Export request spans over OTLP
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false, action = ArgAction::Set)]
    pub enabled: bool,

    /// Continue traces whose `traceparent` header arrives with the request
    #[arg(
        long = "otel-parent-propagation-enabled",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub continue_remote_traces: bool,

    /// Collector gRPC endpoint
    #[arg(
        long = "otel-exporter-otlp-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    #[arg(
        long = "otel-exporter-otlp-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3
    )]
    pub timeout_seconds: u64,

    #[arg(long = "otel-service-name", env = "OTEL_SERVICE_NAME", default_value = "storefront-json")]
    pub service_name: String,

    #[arg(long = "otel-service-version", env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub service_version: String,

    #[arg(
        long = "otel-deployment-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: String,

    /// Share of new traces to keep, 0.0 to 1.0
    #[arg(long = "otel-trace-sample-ratio", env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub sample_ratio: f64,
}

impl TelemetryConfig {
    #[must_use]
    pub fn export_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The configured ratio forced into `[0.0, 1.0]`; `NaN` keeps everything.
    #[must_use]
    pub fn bounded_sample_ratio(&self) -> f64 {
        if self.sample_ratio.is_nan() {
            1.0
        } else {
            self.sample_ratio.clamp(0.0, 1.0)
        }
    }
}
