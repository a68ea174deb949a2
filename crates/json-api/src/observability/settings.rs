//! Request tracing knobs fixed at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

static REQUEST_TRACING: OnceLock<RequestTracing> = OnceLock::new();

/// How the request middleware reports on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestTracing {
    /// Requests slower than this are logged at `warn`.
    pub(super) slow_request: Duration,

    /// Continue traces started by the caller's `traceparent` header.
    pub(super) continue_remote_traces: bool,
}

impl Default for RequestTracing {
    fn default() -> Self {
        Self {
            slow_request: Duration::from_secs(1),
            continue_remote_traces: false,
        }
    }
}

impl RequestTracing {
    fn from_config(config: &ServerConfig) -> Self {
        Self {
            slow_request: Duration::from_millis(config.logging.slow_request_threshold_ms),
            continue_remote_traces: config.telemetry.enabled
                && config.telemetry.continue_remote_traces,
        }
    }
}

/// Fix the settings for the life of the process; later calls are ignored.
pub(super) fn install(config: &ServerConfig) {
    _ = REQUEST_TRACING.set(RequestTracing::from_config(config));
}

/// Installed settings, or the defaults when nothing was installed (tests).
pub(super) fn request_tracing() -> RequestTracing {
    REQUEST_TRACING.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn remote_traces_need_export_enabled() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--jwt-secret",
            "secret",
            "--otel-parent-propagation-enabled",
            "true",
            "--slow-request-threshold-ms",
            "250",
        ])?;

        let tracing = RequestTracing::from_config(&config);

        assert!(!tracing.continue_remote_traces, "export is off by default");
        assert_eq!(tracing.slow_request, Duration::from_millis(250));

        Ok(())
    }
}
