//! Get Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::customers::records::CustomerRecord;

use crate::{errors::ApiError, extensions::*, state::State};

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    /// The unique identifier of the customer
    pub uuid: Uuid,

    /// The user owning this profile
    pub user: Uuid,

    pub name: String,
    pub email: String,
    pub phone: String,

    /// The date and time the customer was created
    pub created_at: String,

    /// The date and time the customer was last updated
    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerResponse {
            uuid: customer.uuid.into_uuid(),
            user: customer.user_uuid.into_uuid(),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}

/// Get Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer(customer.into_inner().into())
        .await?;

    Ok(Json(customer.into()))
}
