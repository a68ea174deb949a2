//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("no active account found with the given credentials")]
    InvalidCredentials,

    #[error("token is invalid or expired")]
    InvalidToken,

    #[error("user not found")]
    NotFound,

    #[error("a user with this username or email already exists")]
    AlreadyExists,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{0}")]
    Validation(String),

    #[error("OIDC issuer is not configured")]
    OidcNotConfigured,

    #[error("password hashing failed")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed")]
    HashingTask(#[from] JoinError),

    #[error("token encoding failed")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation | ErrorKind::ForeignKeyViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
