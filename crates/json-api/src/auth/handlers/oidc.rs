//! OIDC Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::auth::{
    data::{OidcAssertion, OidcUserInfo},
    records::OidcLogin,
};

use crate::{
    customers::get::CustomerResponse, errors::ApiError, extensions::*, state::State,
};

/// Claims asserted by the identity provider.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserInfoRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub phone: Option<String>,
    pub phone_number: Option<String>,
}

impl From<UserInfoRequest> for OidcUserInfo {
    fn from(request: UserInfoRequest) -> Self {
        OidcUserInfo {
            email: request.email,
            name: request.name,
            given_name: request.given_name,
            family_name: request.family_name,
            phone: request.phone,
            phone_number: request.phone_number,
        }
    }
}

/// OIDC Login Request
///
/// Exactly one of `user_info` (demo mode) or `id_token` is expected. An
/// `id_token` wins when both are sent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OidcLoginRequest {
    pub user_info: Option<UserInfoRequest>,
    pub id_token: Option<String>,
}

impl TryFrom<OidcLoginRequest> for OidcAssertion {
    type Error = ApiError;

    fn try_from(request: OidcLoginRequest) -> Result<Self, Self::Error> {
        match (request.id_token, request.user_info) {
            (Some(id_token), _) => Ok(OidcAssertion::IdToken(id_token)),
            (None, Some(user_info)) => Ok(OidcAssertion::UserInfo(user_info.into())),
            (None, None) => Err(ApiError::bad_request(
                "Either id_token or user_info is required",
            )),
        }
    }
}

/// Signed-in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OidcUserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
}

/// OIDC Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OidcLoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: OidcUserResponse,
    pub customer: CustomerResponse,

    /// True when this login created the user
    pub created: bool,
}

impl From<OidcLogin> for OidcLoginResponse {
    fn from(login: OidcLogin) -> Self {
        Self {
            access_token: login.tokens.access,
            refresh_token: login.tokens.refresh,
            user: OidcUserResponse {
                uuid: login.user.uuid.into_uuid(),
                username: login.user.username,
                email: login.user.email,
                name: login.name,
            },
            customer: login.customer.into(),
            created: login.created,
        }
    }
}

/// OIDC Login Handler
///
/// Gets or creates the user and customer profile behind an assertion.
#[endpoint(
    tags("auth"),
    summary = "OIDC Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid claims"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid id token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<OidcLoginRequest>,
    depot: &mut Depot,
) -> Result<Json<OidcLoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let assertion = OidcAssertion::try_from(json.into_inner())?;

    let login = state.app.auth.oidc_login(assertion).await?;

    Ok(Json(login.into()))
}
