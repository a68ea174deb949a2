//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub category_path: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Live products can be listed, priced and ordered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A bulk upload item that could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemError {
    pub index: usize,
    pub sku: String,
    pub error: String,
}

/// Result of a best-effort bulk upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub created: Vec<ProductRecord>,
    pub errors: Vec<BulkItemError>,
}

impl BulkOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}
