//! Order Errors

use serde_json::{Value, json};
use tracing::error;

use storefront_app::domain::orders::{OrdersServiceError, data::LineError};

use crate::errors::ApiError;

/// `{"items": [{"index", "product_id", "error"}, ...]}`
fn line_details(lines: &[LineError]) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|line| {
            json!({
                "index": line.index,
                "product_id": line.product_uuid.into_uuid(),
                "error": line.problem.to_string(),
            })
        })
        .collect();

    json!({ "items": items })
}

impl From<OrdersServiceError> for ApiError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::AlreadyExists => ApiError::conflict("Order already exists"),
            OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
            OrdersServiceError::CustomerNotFound => {
                ApiError::forbidden("A customer profile is required to place orders")
            }
            OrdersServiceError::InvalidReference => {
                ApiError::bad_request("Order refers to a missing product")
            }
            OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
                ApiError::bad_request("Invalid order payload")
            }
            OrdersServiceError::Validation(message) => ApiError::bad_request(message),
            OrdersServiceError::InvalidLines(lines) => {
                ApiError::bad_request("Invalid order items").with_details(line_details(&lines))
            }
            OrdersServiceError::InsufficientStock(lines) => {
                ApiError::conflict("Insufficient stock").with_details(line_details(&lines))
            }
            OrdersServiceError::Sql(source) => {
                error!("order storage error: {source}");

                ApiError::internal()
            }
        }
    }
}
