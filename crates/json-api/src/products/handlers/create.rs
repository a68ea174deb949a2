//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use storefront_app::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductCategory},
        records::ProductUuid,
    },
};

use crate::{errors::ApiError, extensions::*, products::get::ProductResponse, state::State};

/// Raised when a product names both or neither of `category` and `category_path`.
#[derive(Debug, Error)]
#[error("Provide exactly one of category or category_path")]
pub(crate) struct AmbiguousCategory;

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    /// An existing category
    #[serde(default)]
    pub category: Option<Uuid>,

    /// Category names from the root down; missing levels are created
    #[serde(default)]
    pub category_path: Option<Vec<String>>,

    pub sku: String,
    pub stock_quantity: i64,
}

impl CreateProductRequest {
    pub(crate) fn into_new_product(self) -> Result<NewProduct, AmbiguousCategory> {
        let category = match (self.category, self.category_path) {
            (Some(category), None) => ProductCategory::Existing(CategoryUuid::from_uuid(category)),
            (None, Some(path)) => ProductCategory::Path(path),
            _ => return Err(AmbiguousCategory),
        };

        Ok(NewProduct {
            uuid: ProductUuid::new(),
            category,
            name: self.name,
            description: self.description,
            price: self.price,
            sku: self.sku,
            stock_quantity: self.stock_quantity,
        })
    }
}

/// Create Product Handler
///
/// Files the product under an existing category, or under a category path that
/// is created on demand in the same transaction.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "SKU already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = json
        .into_inner()
        .into_new_product()
        .map_err(|error| ApiError::bad_request(error.to_string()))?;

    let product = state.app.products.create_product(product).await?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
