//! Bulk Upload Products Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_app::domain::products::{
    data::NewProduct,
    records::{BulkItemError, BulkOutcome},
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{create::CreateProductRequest, get::ProductResponse},
    state::State,
};

/// Bulk Upload Item Error
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkErrorResponse {
    /// Zero-based position of the item in the request
    pub index: usize,

    pub sku: String,
    pub error: String,
}

impl From<BulkItemError> for BulkErrorResponse {
    fn from(error: BulkItemError) -> Self {
        BulkErrorResponse {
            index: error.index,
            sku: error.sku,
            error: error.error,
        }
    }
}

/// Bulk Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUploadResponse {
    pub created_count: usize,
    pub error_count: usize,
    pub created_products: Vec<ProductResponse>,
    pub errors: Vec<BulkErrorResponse>,
}

impl From<BulkOutcome> for BulkUploadResponse {
    fn from(outcome: BulkOutcome) -> Self {
        BulkUploadResponse {
            created_count: outcome.created.len(),
            error_count: outcome.errors.len(),
            created_products: outcome.created.into_iter().map(Into::into).collect(),
            errors: outcome.errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Items that parsed, with their request positions, and those that did not.
#[derive(Debug, Default)]
struct Triage {
    products: Vec<NewProduct>,
    positions: Vec<usize>,
    rejected: Vec<BulkItemError>,
}

fn triage(items: Vec<Value>) -> Triage {
    let mut triage = Triage::default();

    for (index, item) in items.into_iter().enumerate() {
        let sku = item
            .get("sku")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let parsed = serde_json::from_value::<CreateProductRequest>(item)
            .map_err(|error| error.to_string())
            .and_then(|request| {
                request
                    .into_new_product()
                    .map_err(|error| error.to_string())
            });

        match parsed {
            Ok(product) => {
                triage.products.push(product);
                triage.positions.push(index);
            }
            Err(error) => triage.rejected.push(BulkItemError { index, sku, error }),
        }
    }

    triage
}

/// Bulk Upload Products Handler
///
/// Creates each product independently. Responds `201` when every item was
/// created and `207` when at least one failed.
#[endpoint(
    tags("products"),
    summary = "Bulk Upload Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Every product created"),
        (status_code = StatusCode::MULTI_STATUS, description = "Some products failed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Body is not a list"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<Value>>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BulkUploadResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Triage {
        products,
        positions,
        rejected,
    } = triage(json.into_inner());

    let mut outcome = if products.is_empty() {
        BulkOutcome::default()
    } else {
        state.app.products.bulk_create(products).await
    };

    for error in &mut outcome.errors {
        if let Some(position) = positions.get(error.index) {
            error.index = *position;
        }
    }

    outcome.errors.extend(rejected);
    outcome.errors.sort_by_key(|error| error.index);

    res.status_code(if outcome.is_complete() {
        StatusCode::CREATED
    } else {
        StatusCode::MULTI_STATUS
    });

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, data::ProductCategory};

    use crate::test_helpers::products_service;

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Router::with_path("products/bulk-upload").post(handler),
        )
    }

    fn item(sku: &str, path: &[&str]) -> Value {
        json!({
            "name": format!("Product {sku}"),
            "price": "99.99",
            "category_path": path,
            "sku": sku,
            "stock_quantity": 50
        })
    }

    #[tokio::test]
    async fn test_all_items_created_returns_201() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_bulk_create()
            .once()
            .withf(|items| {
                items.len() == 2
                    && items.iter().all(|item| {
                        matches!(&item.category, ProductCategory::Path(path) if path.len() == 2)
                    })
            })
            .return_once(|items| BulkOutcome {
                created: items
                    .into_iter()
                    .map(|item| make_product(item.uuid, &item.sku))
                    .collect(),
                errors: Vec::new(),
            });

        let mut res = TestClient::post("http://example.com/products/bulk-upload")
            .json(&json!([
                item("BULK001", &["Bulk", "Category1"]),
                item("BULK002", &["Bulk", "Category2"]),
            ]))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: BulkUploadResponse = res.take_json().await?;

        assert_eq!(body.created_count, 2);
        assert_eq!(body.error_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_items_keep_request_positions() -> TestResult {
        let mut products = MockProductsService::new();

        // The malformed second item never reaches the service, so the third
        // item is at position 1 of the batch the service sees.
        products
            .expect_bulk_create()
            .once()
            .withf(|items| items.len() == 2)
            .return_once(|items| {
                let mut items = items.into_iter();
                let first = items.next();

                BulkOutcome {
                    created: first
                        .map(|item| make_product(item.uuid, &item.sku))
                        .into_iter()
                        .collect(),
                    errors: vec![BulkItemError {
                        index: 1,
                        sku: "DUP".to_string(),
                        error: "a product with this sku already exists".to_string(),
                    }],
                }
            });

        let mut res = TestClient::post("http://example.com/products/bulk-upload")
            .json(&json!([
                item("OK-1", &["Bulk"]),
                { "name": "No price", "sku": "BROKEN", "category_path": ["Bulk"], "stock_quantity": 1 },
                item("DUP", &["Bulk"]),
            ]))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::MULTI_STATUS));

        let body: BulkUploadResponse = res.take_json().await?;

        assert_eq!(body.created_count, 1);
        assert_eq!(body.error_count, 2);

        let failed: Vec<(usize, &str)> = body
            .errors
            .iter()
            .map(|error| (error.index, error.sku.as_str()))
            .collect();

        assert_eq!(failed, [(1, "BROKEN"), (2, "DUP")]);

        Ok(())
    }

    #[tokio::test]
    async fn test_item_with_both_category_forms_is_an_item_error() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_bulk_create().never();

        let mut res = TestClient::post("http://example.com/products/bulk-upload")
            .json(&json!([{
                "name": "Ambiguous",
                "price": "1.00",
                "category": uuid::Uuid::now_v7(),
                "category_path": ["Bulk"],
                "sku": "AMB",
                "stock_quantity": 1
            }]))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::MULTI_STATUS));

        let body: BulkUploadResponse = res.take_json().await?;

        assert_eq!(body.created_count, 0);
        assert_eq!(
            body.errors.first().map(|error| error.error.as_str()),
            Some("Provide exactly one of category or category_path")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_non_list_body_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_bulk_create().never();

        let res = TestClient::post("http://example.com/products/bulk-upload")
            .json(&json!({ "sku": "NOT-A-LIST" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
