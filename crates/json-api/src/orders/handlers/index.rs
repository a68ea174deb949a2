//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::pagination::Page;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{caller_customer, get::OrderResponse},
    pagination::{Paginated, page_request},
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's orders, newest first. Callers without a customer
/// profile have no orders.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Paginated<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let page = page_request(page, page_size)?;

    let orders = match caller_customer(state, user).await? {
        Some(customer) => state.app.orders.list_orders(customer.uuid, page).await?,
        None => Page::new(Vec::new(), 0, page),
    };

    Ok(Json(Paginated::from_page(orders, req.uri().path())))
}
