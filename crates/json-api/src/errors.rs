//! Error envelope
//!
//! Every error response, whether raised by a handler or by the framework,
//! is rendered as `{"error": "...", "details": ...}`.

use salvo::{
    Scribe,
    catcher::Catcher,
    http::ResBody,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable summary
    pub error: String,

    /// Structured context such as per-item failures
    #[salvo(schema(value_type = Option<Object>))]
    pub details: Option<Value>,
}

/// An error rendered with the error envelope.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<Value>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub(crate) fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);

        self
    }

    pub(crate) fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub(crate) fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    pub(crate) fn forbidden(error: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error)
    }

    pub(crate) fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub(crate) fn conflict(error: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error)
    }

    /// Callers log the cause before returning this; it never reaches the client.
    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            error: self.error,
            details: self.details,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorResponse::to_schema(components);

        operation.responses.insert(
            "default",
            oapi::Response::new("Error envelope")
                .add_content("application/json", Content::new(schema)),
        );
    }
}

/// Catcher that rewrites framework errors, such as unmatched routes or
/// unparsable bodies, into the error envelope.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(error_envelope)
}

#[handler]
async fn error_envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    if !(status.is_client_error() || status.is_server_error()) {
        return;
    }

    let error = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        ResBody::Error(_) | ResBody::None => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
        _ => return,
    };

    ApiError::new(status, error).render(res);

    ctrl.skip_rest();
}
