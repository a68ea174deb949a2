//! Customer Errors

use tracing::error;

use storefront_app::domain::customers::CustomersServiceError;

use crate::errors::ApiError;

impl From<CustomersServiceError> for ApiError {
    fn from(error: CustomersServiceError) -> Self {
        match error {
            CustomersServiceError::AlreadyExists => {
                ApiError::conflict("A customer profile already exists for this user")
            }
            CustomersServiceError::NotFound => ApiError::not_found("Customer not found"),
            CustomersServiceError::InvalidReference
            | CustomersServiceError::MissingRequiredData
            | CustomersServiceError::InvalidData => {
                ApiError::bad_request("Invalid customer payload")
            }
            CustomersServiceError::Validation(message) => ApiError::bad_request(message),
            CustomersServiceError::Sql(source) => {
                error!("customer storage error: {source}");

                ApiError::internal()
            }
        }
    }
}
