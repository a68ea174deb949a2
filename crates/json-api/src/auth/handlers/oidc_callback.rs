//! OIDC Callback Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// Authorization code returned by the provider.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CallbackRequest {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// OIDC Callback Handler
///
/// Authorization code exchange is not supported; clients post assertions to
/// the login endpoint instead.
#[endpoint(
    tags("auth"),
    summary = "OIDC Authorization Code Callback",
    responses(
        (status_code = StatusCode::BAD_REQUEST, description = "Missing authorization code"),
        (status_code = StatusCode::NOT_IMPLEMENTED, description = "Code exchange is not implemented"),
    ),
)]
pub(crate) async fn handler(json: JsonBody<CallbackRequest>) -> Result<StatusCode, ApiError> {
    let has_code = json
        .into_inner()
        .code
        .is_some_and(|code| !code.trim().is_empty());

    if !has_code {
        return Err(ApiError::bad_request("Authorization code is required"));
    }

    Err(ApiError::new(
        StatusCode::NOT_IMPLEMENTED,
        "Authorization code exchange is not implemented",
    ))
}
