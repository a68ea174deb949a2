//! Update Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::customers::data::CustomerUpdate;

use crate::{customers::get::CustomerResponse, errors::ApiError, extensions::*, state::State};

/// Update Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(request: UpdateCustomerRequest) -> Self {
        CustomerUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Update Customer Handler
///
/// Only the owner of a profile may change it; other profiles are reported as missing.
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<UpdateCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let customer = state
        .app
        .customers
        .update_customer(user, customer.into_inner().into(), json.into_inner().into())
        .await?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::customers::{
        CustomersServiceError, MockCustomersService,
        records::{CustomerRecord, CustomerUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, customers_service};

    use super::{super::tests::make_customer, *};

    fn make_service(customers: MockCustomersService) -> Service {
        customers_service(
            customers,
            Router::with_path("customers/{customer}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_forwards_caller_and_fields() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .withf(move |user, customer, update| {
                *user == TEST_USER_UUID
                    && *customer == uuid
                    && update.name == "Jane W."
                    && update.email == "jane.w@example.com"
            })
            .return_once(move |_, _, update| {
                Ok(CustomerRecord {
                    name: update.name,
                    email: update.email,
                    phone: update.phone,
                    ..make_customer(uuid, TEST_USER_UUID)
                })
            });

        let mut res = TestClient::put(format!("http://example.com/customers/{uuid}"))
            .json(&json!({
                "name": "Jane W.",
                "email": "jane.w@example.com",
                "phone": "+254799999999"
            }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CustomerResponse = res.take_json().await?;

        assert_eq!(body.name, "Jane W.");
        assert_eq!(body.phone, "+254799999999");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_of_foreign_profile_returns_404() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .return_once(|_, _, _| Err(CustomersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/customers/{}", Uuid::now_v7()))
            .json(&json!({
                "name": "Mallory",
                "email": "mallory@example.com",
                "phone": "+254700000000"
            }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
