//! Obtain Token Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use storefront_app::auth::{data::Credentials, records::TokenPair};

use crate::{errors::ApiError, extensions::*, state::State};

/// Obtain Token Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl From<TokenRequest> for Credentials {
    fn from(request: TokenRequest) -> Self {
        Credentials {
            username: request.username,
            password: Zeroizing::new(request.password),
        }
    }
}

/// Token Pair Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenPairResponse {
    /// Short-lived token for the `Authorization` header
    pub access: String,

    /// Long-lived token exchanged for new access tokens
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
        }
    }
}

/// Obtain Token Handler
#[endpoint(
    tags("auth"),
    summary = "Obtain Token Pair",
    responses(
        (status_code = StatusCode::OK, description = "Token pair issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TokenRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tokens = state
        .app
        .auth
        .obtain_token(json.into_inner().into())
        .await?;

    Ok(Json(tokens.into()))
}
