//! Product Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::AlreadyExists => {
                ApiError::conflict("A product with this SKU already exists")
            }
            ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
            ProductsServiceError::InvalidReference => ApiError::bad_request("Category not found"),
            ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
                ApiError::bad_request("Invalid product payload")
            }
            ProductsServiceError::Validation(message) => ApiError::bad_request(message),
            ProductsServiceError::NegativeStock => {
                ApiError::bad_request("Stock quantity must not be negative")
            }
            ProductsServiceError::InvalidPath(source) => ApiError::bad_request(source.to_string()),
            ProductsServiceError::Sql(source) => {
                error!("product storage error: {source}");

                ApiError::internal()
            }
        }
    }
}
