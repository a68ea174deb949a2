//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use storefront_app::auth::UserUuid;

use crate::{errors::ApiError, extensions::*, state::State};

/// Resolve the bearer token to a user, or explain why the caller is anonymous.
async fn authenticate(token: Option<&str>, depot: &Depot) -> Result<UserUuid, ApiError> {
    let token =
        token.ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(state.app.auth.authenticate_bearer(token).await?)
}

/// Rejects anonymous callers; downstream handlers read the user from the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let outcome = authenticate(bearer_token(req), depot).await;

    match outcome {
        Ok(user) => {
            depot.insert_user_uuid(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

/// `Authorization: Bearer <token>`, scheme matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
