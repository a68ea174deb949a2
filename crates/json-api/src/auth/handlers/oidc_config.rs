//! OIDC Client Configuration Handler

use std::sync::Arc;

use salvo::{http::header::HOST, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, state::State};

const CALLBACK_PATH: &str = "/auth/oidc/callback/";

/// OIDC Client Configuration Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OidcConfigResponse {
    pub issuer: String,
    pub client_id: String,

    /// Where the provider should send the authorization code
    pub redirect_uri: String,

    pub scope: String,

    /// True while no provider is configured and user-info logins are accepted
    pub demo_mode: bool,
}

/// OIDC Client Configuration Handler
#[endpoint(tags("auth"), summary = "OIDC Client Configuration")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OidcConfigResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let config = state.app.auth.oidc_config();

    Ok(Json(OidcConfigResponse {
        issuer: config.issuer,
        client_id: config.client_id,
        redirect_uri: redirect_uri(req),
        scope: config.scope.to_string(),
        demo_mode: config.demo_mode,
    }))
}

fn redirect_uri(req: &Request) -> String {
    let scheme = req.uri().scheme_str().unwrap_or("http");

    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}{CALLBACK_PATH}")
}
