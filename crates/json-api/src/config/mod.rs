//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig, db::DatabaseConfig, logging::LoggingConfig,
    notifications::NotificationsConfig, server::ServerRuntimeConfig, telemetry::TelemetryConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod notifications;
pub(crate) mod server;
pub(crate) mod telemetry;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// OpenTelemetry trace export settings.
    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token and OIDC settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// SMS and email delivery settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "storefront-json",
        "--database-url",
        "postgres://localhost/storefront",
        "--jwt-secret",
        "secret",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert!(!config.server.debug, "debug should default to off");
        assert_eq!(config.auth.access_token_ttl_seconds, 300);
        assert_eq!(config.auth.refresh_token_ttl_seconds, 86_400);
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);
        assert_eq!(config.notifications.smtp_port, 587);
        assert!(!config.telemetry.enabled, "trace export should be opt-in");
        assert_eq!(config.telemetry.service_name, "storefront-json");

        Ok(())
    }

    #[test]
    fn allowed_hosts_split_on_commas() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED
                .into_iter()
                .chain(["--allowed-hosts", "shop.example.com,localhost"]),
        )?;

        assert_eq!(
            config.server.allowed_hosts,
            vec!["shop.example.com".to_string(), "localhost".to_string()]
        );

        Ok(())
    }
}
