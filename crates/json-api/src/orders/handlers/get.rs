//! Get Order Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    OrdersServiceError,
    records::{OrderItemRecord, OrderRecord},
};

use crate::{errors::ApiError, extensions::*, orders::caller_customer, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub product_name: String,
    pub quantity: u32,

    /// Product price when the order was placed
    #[salvo(schema(value_type = String))]
    pub unit_price: Decimal,

    #[salvo(schema(value_type = String))]
    pub subtotal: Decimal,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into_uuid(),
            product: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    pub customer: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    /// One of `pending`, `confirmed`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    #[salvo(schema(value_type = String))]
    pub total_amount: Decimal,

    pub notes: Option<String>,

    /// Lines in the order they were requested
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            customer: order.customer_uuid.into_uuid(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            status: order.status.to_string(),
            total_amount: order.total_amount,
            notes: order.notes,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders. Orders of other customers are reported as missing.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let customer = caller_customer(state, user)
        .await?
        .ok_or(OrdersServiceError::NotFound)?;

    let order = state
        .app
        .orders
        .get_order(customer.uuid, order.into_inner().into())
        .await?;

    Ok(Json(order.into()))
}
