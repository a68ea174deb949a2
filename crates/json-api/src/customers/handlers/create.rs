//! Create Customer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    auth::UserUuid,
    domain::customers::{data::NewCustomer, records::CustomerUuid},
};

use crate::{customers::get::CustomerResponse, errors::ApiError, extensions::*, state::State};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    pub name: String,
    pub email: String,

    /// International format, e.g. `+254712345678`
    pub phone: String,
}

impl CreateCustomerRequest {
    fn into_new_customer(self, user_uuid: UserUuid) -> NewCustomer {
        NewCustomer {
            uuid: CustomerUuid::new(),
            user_uuid,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Create Customer Handler
///
/// Creates the caller's customer profile.
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Caller already has a profile"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let customer = state
        .app
        .customers
        .create_customer(json.into_inner().into_new_customer(user))
        .await?;

    res.add_header(LOCATION, format!("/customers/{}", customer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(customer.into()))
}
