//! `Host` header allow-list.

use salvo::{http::header::HOST, prelude::*};
use tracing::warn;

use crate::errors::ApiError;

/// Rejects requests whose `Host` header is not configured.
#[derive(Debug, Clone)]
pub(crate) struct AllowedHosts {
    hosts: Vec<String>,
}

impl AllowedHosts {
    pub(crate) fn new(hosts: Vec<String>) -> Self {
        Self {
            hosts: hosts
                .into_iter()
                .map(|host| host.trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    fn allows(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        let name = strip_port(&host);

        self.hosts
            .iter()
            .any(|allowed| allowed == "*" || allowed == &host || allowed == name)
    }
}

#[handler]
impl AllowedHosts {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let host = req
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
            .unwrap_or_default()
            .to_string();

        let host = host.as_str();

        if !self.allows(host) {
            warn!(host, "request rejected by host allow-list");

            res.render(ApiError::bad_request(format!("Invalid host header: {host}")));
            ctrl.skip_rest();

            return;
        }

        ctrl.call_next(req, depot, res).await;
    }
}

/// `example.com:8698` -> `example.com`, leaving IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.split_once(']').map_or(host, |(literal, _)| {
            literal.strip_prefix('[').unwrap_or(literal)
        });
    }

    host.rsplit_once(':').map_or(host, |(name, _port)| name)
}
