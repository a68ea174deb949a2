//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    orders::{
        data::{NewOrder, NewOrderLine},
        records::OrderUuid,
    },
    products::records::ProductUuid,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::record_order_placed,
    orders::{caller_customer, get::OrderResponse},
    state::State,
};

/// Order Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i64,
}

impl From<OrderLineRequest> for NewOrderLine {
    fn from(line: OrderLineRequest) -> Self {
        NewOrderLine {
            product_uuid: ProductUuid::from_uuid(line.product_id),
            quantity: line.quantity,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Must be the caller's own customer profile when given
    #[serde(default)]
    pub customer: Option<Uuid>,

    #[serde(default)]
    pub notes: Option<String>,

    pub items: Vec<OrderLineRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            notes: request.notes,
            items: request.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Order Handler
///
/// Places an order for the caller's customer profile. Stock is reserved and
/// prices are captured in one transaction; either every line is recorded or
/// nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order lines"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller has no customer profile, or named another customer"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let customer = caller_customer(state, user).await?.ok_or_else(|| {
        ApiError::forbidden("A customer profile is required to place orders")
    })?;

    if request
        .customer
        .is_some_and(|requested| requested != customer.uuid.into_uuid())
    {
        return Err(ApiError::forbidden(
            "Orders can only be placed for your own customer profile",
        ));
    }

    let order = state
        .app
        .orders
        .place_order(customer.uuid, request.into())
        .await?;

    record_order_placed();

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
