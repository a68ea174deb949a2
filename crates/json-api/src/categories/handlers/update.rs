//! Update Category Handler

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

use storefront_app::domain::categories::{data::CategoryUpdate, records::CategoryUuid};

use crate::{categories::get::CategoryResponse, errors::ApiError, extensions::*, state::State};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// New parent; omit to move the category to the top level
    #[serde(default)]
    pub parent: Option<Uuid>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            parent_uuid: request.parent.map(CategoryUuid::from_uuid),
            name: request.name,
            description: request.description,
        }
    }
}

/// Update Category Handler
///
/// Renames, re-describes or re-parents a category.
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(category.into_inner().into(), json.into_inner().into())
        .await?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::{errors::ErrorResponse, test_helpers::categories_service};

    use super::{
        super::tests::{make_child, make_node},
        *,
    };

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(
            categories,
            Router::with_path("categories/{category}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_reparent_category() -> TestResult {
        let uuid = CategoryUuid::new();
        let parent = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(move |requested, update| {
                *requested == uuid
                    && update.parent_uuid == Some(parent)
                    && update.name == "Phones"
            })
            .return_once(move |requested, update| {
                let root = make_node(parent, "Electronics");

                Ok(make_child(&root, requested, &update.name))
            });

        let mut res = TestClient::put(format!("http://example.com/categories/{uuid}"))
            .json(&json!({ "name": "Phones", "parent": parent.into_uuid() }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(body.parent, Some(parent.into_uuid()));
        assert_eq!(body.full_path, "Electronics > Phones");

        Ok(())
    }

    #[tokio::test]
    async fn test_moving_beneath_descendant_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::CycleDetected));

        let mut res = TestClient::put(format!("http://example.com/categories/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Electronics", "parent": Uuid::now_v7() }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert!(body.error.contains("descendants"), "got {}", body.error);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_category_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/categories/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Ghost" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
