//! Request-level logging, request IDs, metrics and parent trace extraction.

mod ids;
mod parent_context;
mod routes;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths polled by infrastructure; logging them drowns everything else.
const QUIET_PATHS: [&str; 2] = ["/healthcheck", "/metrics"];

/// What is known about a request before it is handled.
#[derive(Debug)]
struct RequestContext {
    request_id: String,
    method: String,
    path: String,
    route: String,
}

impl RequestContext {
    fn from_request(req: &Request) -> Self {
        let path = req.uri().path().to_owned();

        Self {
            request_id: ids::resolve(req.header::<String>(ids::REQUEST_ID_HEADER)),
            method: req.method().to_string(),
            route: routes::template(&path),
            path,
        }
    }

    fn span(&self, req: &Request) -> Span {
        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %format!("{} {}", self.method, self.route),
            otel.kind = "server",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        if settings::request_tracing().continue_remote_traces
            && let Some(parent) = parent_context::extract(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("failed to set parent context on request span: {source}");
        }

        span
    }

    fn finish(&self, span: &Span, status: StatusCode, duration: Duration) {
        let duration_ms = duration.as_millis();
        let threshold_ms = settings::request_tracing().slow_request.as_millis();

        metrics::observe_request(
            &self.method,
            &self.route,
            status.as_u16(),
            duration.as_secs_f64(),
        );

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    "client error response"
                );
            }

            if duration_ms > threshold_ms {
                warn!(
                    method = %self.method,
                    path = %self.path,
                    request_id = %self.request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if QUIET_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let context = RequestContext::from_request(req);
    let span = context.span(req);
    let _in_flight = metrics::InFlightRequestGuard::track();

    depot.insert(REQUEST_ID_DEPOT_KEY, context.request_id.clone());
    ids::echo(res, &context.request_id);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    context.finish(
        &span,
        res.status_code.unwrap_or(StatusCode::OK),
        started.elapsed(),
    );
}
