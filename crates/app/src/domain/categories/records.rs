//! Category Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub parent_uuid: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category placed in its hierarchy, with its subtree attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub record: CategoryRecord,
    pub parent_name: Option<String>,
    pub full_path: String,
    pub children: Vec<CategoryNode>,
}

/// Average price of the live products in a category and its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAveragePrice {
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub category_path: String,
    pub average_price: Decimal,
    pub product_count: u64,
    pub has_products: bool,
    pub includes_subcategories: bool,
}
