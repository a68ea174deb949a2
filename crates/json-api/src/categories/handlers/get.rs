//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::records::CategoryNode;

use crate::{errors::ApiError, extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub uuid: Uuid,

    pub name: String,
    pub description: Option<String>,

    /// Parent category, absent for top-level categories
    pub parent: Option<Uuid>,

    pub parent_name: Option<String>,

    /// Names from the root down, joined with ` > `
    pub full_path: String,

    /// Direct subcategories with their own subtrees
    #[salvo(schema(value_type = Vec<Object>))]
    pub children: Vec<CategoryResponse>,

    /// The date and time the category was created
    pub created_at: String,

    /// The date and time the category was last updated
    pub updated_at: String,
}

impl From<CategoryNode> for CategoryResponse {
    fn from(node: CategoryNode) -> Self {
        CategoryResponse {
            uuid: node.record.uuid.into_uuid(),
            name: node.record.name,
            description: node.record.description,
            parent: node.record.parent_uuid.map(|parent| parent.into_uuid()),
            parent_name: node.parent_name,
            full_path: node.full_path,
            children: node.children.into_iter().map(Into::into).collect(),
            created_at: node.record.created_at.to_string(),
            updated_at: node.record.updated_at.to_string(),
        }
    }
}

/// Get Category Handler
///
/// Returns a category with its nested subcategories.
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(category.into_inner().into())
        .await?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, records::CategoryUuid,
    };

    use crate::test_helpers::categories_service;

    use super::{
        super::tests::{make_child, make_node},
        *,
    };

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(
            categories,
            Router::with_path("categories/{category}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_category_nests_children() -> TestResult {
        let uuid = CategoryUuid::new();
        let child_uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| {
                let mut node = make_node(uuid, "Electronics");
                let child = make_child(&node, child_uuid, "Laptops");

                node.children.push(child);

                Ok(node)
            });

        let mut res = TestClient::get(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(body.name, "Electronics");
        assert_eq!(body.parent, None);

        let child = body.children.first();

        assert!(
            child.is_some_and(|child| child.uuid == child_uuid.into_uuid()
                && child.parent == Some(uuid.into_uuid())
                && child.full_path == "Electronics > Laptops"),
            "unexpected children {:?}",
            body.children
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_category_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/categories/{}", Uuid::now_v7()))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_uuid_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_get_category().never();

        let res = TestClient::get("http://example.com/categories/not-a-uuid")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
