//! Order Handlers

use storefront_app::{
    auth::UserUuid,
    domain::customers::{CustomersServiceError, records::CustomerRecord},
};

use crate::{errors::ApiError, state::State};

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// The caller's customer profile, if they have created one.
pub(crate) async fn caller_customer(
    state: &State,
    user: UserUuid,
) -> Result<Option<CustomerRecord>, ApiError> {
    match state.app.customers.get_customer_for_user(user).await {
        Ok(customer) => Ok(Some(customer)),
        Err(CustomersServiceError::NotFound) => Ok(None),
        Err(error) => Err(error.into()),
    }
}
