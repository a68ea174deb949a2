//! Category Average Price Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::records::CategoryAveragePrice;

use crate::{errors::ApiError, extensions::*, state::State};

/// Category Average Price Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AveragePriceResponse {
    pub category_uuid: Uuid,
    pub category_name: String,

    /// Names from the root down, joined with ` > `
    pub category_path: String,

    /// Mean price of live products in the category and all of its descendants,
    /// rounded to cents
    #[salvo(schema(value_type = String))]
    pub average_price: Decimal,

    pub product_count: u64,
    pub has_products: bool,

    /// Whether descendant categories contributed to the figure
    pub includes_subcategories: bool,
}

impl From<CategoryAveragePrice> for AveragePriceResponse {
    fn from(average: CategoryAveragePrice) -> Self {
        AveragePriceResponse {
            category_uuid: average.category_uuid.into_uuid(),
            category_name: average.category_name,
            category_path: average.category_path,
            average_price: average.average_price,
            product_count: average.product_count,
            has_products: average.has_products,
            includes_subcategories: average.includes_subcategories,
        }
    }
}

/// Category Average Price Handler
#[endpoint(
    tags("categories"),
    summary = "Category Average Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Average price, zero when the subtree has no products"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AveragePriceResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let average = state
        .app
        .categories
        .average_price(category.into_inner().into())
        .await?;

    Ok(Json(average.into()))
}
