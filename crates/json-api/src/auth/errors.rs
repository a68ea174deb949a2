//! Auth Errors

use tracing::error;

use storefront_app::auth::AuthServiceError;

use crate::errors::ApiError;

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::InvalidCredentials => {
                ApiError::unauthorized("No active account found with the given credentials")
            }
            AuthServiceError::InvalidToken => {
                ApiError::unauthorized("Token is invalid or expired")
            }
            AuthServiceError::NotFound => ApiError::not_found("User not found"),
            AuthServiceError::AlreadyExists => {
                ApiError::conflict("A user with this username already exists")
            }
            AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
                ApiError::bad_request("Invalid user payload")
            }
            AuthServiceError::Validation(message) => ApiError::bad_request(message),
            AuthServiceError::OidcNotConfigured => {
                error!("id token received but OIDC is not configured");

                ApiError::new(
                    salvo::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "OIDC provider is not configured",
                )
            }
            AuthServiceError::Hashing(source) => {
                error!("failed to hash password: {source}");

                ApiError::internal()
            }
            AuthServiceError::HashingTask(source) => {
                error!("password hashing task failed: {source}");

                ApiError::internal()
            }
            AuthServiceError::TokenEncoding(source) => {
                error!("failed to encode token: {source}");

                ApiError::internal()
            }
            AuthServiceError::Sql(source) => {
                error!("auth storage error: {source}");

                ApiError::internal()
            }
        }
    }
}
