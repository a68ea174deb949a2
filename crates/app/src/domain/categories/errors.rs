//! Categories service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::categories::data::InvalidCategoryPath;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("a category with this name already exists under the same parent")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("parent category not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{0}")]
    Validation(String),

    #[error("a category cannot be moved beneath itself or one of its descendants")]
    CycleDetected,

    #[error("category still has subcategories or products")]
    NotEmpty,

    #[error(transparent)]
    InvalidPath(#[from] InvalidCategoryPath),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CategoriesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
