//! Category Errors

use tracing::error;

use storefront_app::domain::categories::CategoriesServiceError;

use crate::errors::ApiError;

impl From<CategoriesServiceError> for ApiError {
    fn from(error: CategoriesServiceError) -> Self {
        match error {
            CategoriesServiceError::AlreadyExists => ApiError::conflict(
                "A category with this name already exists under the same parent",
            ),
            CategoriesServiceError::NotFound => ApiError::not_found("Category not found"),
            CategoriesServiceError::InvalidReference => {
                ApiError::bad_request("Parent category not found")
            }
            CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
                ApiError::bad_request("Invalid category payload")
            }
            CategoriesServiceError::Validation(message) => ApiError::bad_request(message),
            CategoriesServiceError::CycleDetected => ApiError::bad_request(
                "A category cannot be moved beneath itself or one of its descendants",
            ),
            CategoriesServiceError::NotEmpty => {
                ApiError::conflict("Category still has subcategories or products")
            }
            CategoriesServiceError::InvalidPath(source) => ApiError::bad_request(source.to_string()),
            CategoriesServiceError::Sql(source) => {
                error!("category storage error: {source}");

                ApiError::internal()
            }
        }
    }
}
