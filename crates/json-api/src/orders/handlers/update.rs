//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use storefront_app::domain::orders::{
    OrdersServiceError,
    data::OrderUpdate,
    records::{OrderStatus, UnknownOrderStatus},
};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{caller_customer, get::OrderResponse},
    state::State,
};

/// Update Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// One of `pending`, `confirmed`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<UpdateOrderRequest> for OrderUpdate {
    type Error = UnknownOrderStatus;

    fn try_from(request: UpdateOrderRequest) -> Result<Self, Self::Error> {
        Ok(OrderUpdate {
            status: request.status.parse()?,
            notes: request.notes,
        })
    }
}

fn unknown_status(error: &UnknownOrderStatus) -> ApiError {
    let allowed: Vec<&str> = OrderStatus::ALL.into_iter().map(OrderStatus::as_str).collect();

    ApiError::bad_request(error.to_string()).with_details(json!({ "allowed": allowed }))
}

/// Update Order Handler
///
/// Changes the status and notes of one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let update = OrderUpdate::try_from(json.into_inner()).map_err(|error| unknown_status(&error))?;

    let customer = caller_customer(state, user)
        .await?
        .ok_or(OrdersServiceError::NotFound)?;

    let order = state
        .app
        .orders
        .update_order(customer.uuid, order.into_inner().into(), update)
        .await?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        customers::{MockCustomersService, records::CustomerUuid},
        orders::{MockOrdersService, records::OrderUuid},
    };

    use crate::{errors::ErrorResponse, test_helpers::orders_service};

    use super::{
        super::tests::{customers_resolving, make_order},
        *,
    };

    fn make_service(orders: MockOrdersService, customers: MockCustomersService) -> Service {
        orders_service(
            orders,
            customers,
            Router::with_path("orders/{order}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_and_notes() -> TestResult {
        let customer = CustomerUuid::new();
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order()
            .once()
            .withf(move |owner, requested, update| {
                *owner == customer
                    && *requested == uuid
                    && update.status == OrderStatus::Shipped
                    && update.notes.as_deref() == Some("Courier: G4S")
            })
            .return_once(|owner, requested, update| {
                let mut order = make_order(requested, owner);

                order.status = update.status;
                order.notes = update.notes;

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "status": "shipped", "notes": "Courier: G4S" }))
            .send(&make_service(orders, customers_resolving(customer)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "shipped");
        assert_eq!(body.notes.as_deref(), Some("Courier: G4S"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_get_customer_for_user().never();

        let mut orders = MockOrdersService::new();

        orders.expect_update_order().never();

        let mut res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "status": "lost" }))
            .send(&make_service(orders, customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "unknown order status \"lost\"");
        assert_eq!(
            body.details,
            Some(json!({
                "allowed": ["pending", "confirmed", "processing", "shipped", "delivered", "cancelled"]
            }))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_other_customers_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(orders, customers_resolving(CustomerUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
