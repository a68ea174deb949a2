//! Refresh Token Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, state::State};

/// Refresh Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefreshRequest {
    pub refresh: String,
}

/// Access Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccessTokenResponse {
    pub access: String,
}

/// Refresh Token Handler
#[endpoint(
    tags("auth"),
    summary = "Refresh Access Token",
    responses(
        (status_code = StatusCode::OK, description = "Access token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Refresh token is invalid or expired"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RefreshRequest>,
    depot: &mut Depot,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let access = state
        .app
        .auth
        .refresh_token(&json.into_inner().refresh)
        .await?;

    Ok(Json(AccessTokenResponse { access }))
}
