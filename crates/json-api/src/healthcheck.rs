//! Liveness check

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Health {
    /// Always `ok` while the process is serving requests
    pub status: String,

    /// Service name
    pub service: String,

    /// Crate version of the running binary
    pub version: String,
}

impl Health {
    fn current() -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Liveness check
///
/// Does not touch the database, so it stays green while storage is degraded.
#[endpoint(tags("health"), summary = "Liveness check")]
pub(crate) async fn handler() -> Json<Health> {
    Json(Health::current())
}
