//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductCategory},
        records::ProductUuid,
    },
};

/// A product named after its SKU in an existing category.
pub(crate) fn new_product(
    sku: &str,
    price: Decimal,
    category: CategoryUuid,
    stock_quantity: i64,
) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        category: ProductCategory::Existing(category),
        name: format!("Product {sku}"),
        description: None,
        price,
        sku: sku.to_string(),
        stock_quantity,
    }
}
