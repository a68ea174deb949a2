//! Products Data

use rust_decimal::Decimal;

use crate::domain::{
    categories::{data::CategoryPath, records::CategoryUuid},
    products::{errors::ProductsServiceError, records::ProductUuid},
    validation::required_text,
};

/// Largest price a `NUMERIC(10, 2)` column holds.
const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

/// Where a new product is filed.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCategory {
    /// An existing category.
    Existing(CategoryUuid),

    /// Category names from the root down, created when missing.
    Path(Vec<String>),
}

/// A product category whose path, if any, passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CategoryTarget {
    Existing(CategoryUuid),
    Path(CategoryPath),
}

impl TryFrom<ProductCategory> for CategoryTarget {
    type Error = ProductsServiceError;

    fn try_from(category: ProductCategory) -> Result<Self, Self::Error> {
        Ok(match category {
            ProductCategory::Existing(category) => Self::Existing(category),
            ProductCategory::Path(names) => Self::Path(CategoryPath::new(names)?),
        })
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category: ProductCategory,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i64,
}

impl NewProduct {
    pub(crate) fn validated(self) -> Result<ValidProduct, ProductsServiceError> {
        Ok(ValidProduct {
            name: product_name(&self.name)?,
            description: self.description.and_then(|text| required_text(&text)),
            price: product_price(self.price)?,
            sku: product_sku(&self.sku)?,
            stock_quantity: stock_quantity(self.stock_quantity)?,
            uuid: self.uuid,
            category: CategoryTarget::try_from(self.category)?,
        })
    }
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i64,
}

impl ProductUpdate {
    pub(crate) fn validated(self) -> Result<ValidProductUpdate, ProductsServiceError> {
        Ok(ValidProductUpdate {
            category_uuid: self.category_uuid,
            name: product_name(&self.name)?,
            description: self.description.and_then(|text| required_text(&text)),
            price: product_price(self.price)?,
            sku: product_sku(&self.sku)?,
            stock_quantity: stock_quantity(self.stock_quantity)?,
        })
    }
}

/// A new product whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidProduct {
    pub uuid: ProductUuid,
    pub category: CategoryTarget,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i32,
}

/// A product update whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidProductUpdate {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i32,
}

fn product_name(name: &str) -> Result<String, ProductsServiceError> {
    required_text(name)
        .ok_or_else(|| ProductsServiceError::Validation("name must not be blank".to_string()))
}

fn product_sku(sku: &str) -> Result<String, ProductsServiceError> {
    required_text(sku)
        .ok_or_else(|| ProductsServiceError::Validation("sku must not be blank".to_string()))
}

fn product_price(price: Decimal) -> Result<Decimal, ProductsServiceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductsServiceError::Validation(
            "price must not be negative".to_string(),
        ));
    }

    if price.normalize().scale() > 2 {
        return Err(ProductsServiceError::Validation(
            "price must have at most 2 decimal places".to_string(),
        ));
    }

    if price.trunc() > MAX_PRICE {
        return Err(ProductsServiceError::Validation(
            "price is too large".to_string(),
        ));
    }

    Ok(price)
}

fn stock_quantity(quantity: i64) -> Result<i32, ProductsServiceError> {
    if quantity < 0 {
        return Err(ProductsServiceError::NegativeStock);
    }

    i32::try_from(quantity).map_err(|_| {
        ProductsServiceError::Validation("stock quantity is too large".to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use crate::domain::categories::data::InvalidCategoryPath;

    use super::*;

    fn product(price: &str, stock_quantity: i64) -> TestResult<NewProduct> {
        Ok(NewProduct {
            uuid: ProductUuid::new(),
            category: ProductCategory::Existing(CategoryUuid::new()),
            name: " Laptop ".to_string(),
            description: Some("  ".to_string()),
            price: Decimal::from_str(price)?,
            sku: "LAP-1".to_string(),
            stock_quantity,
        })
    }

    #[test]
    fn validated_trims_text_and_drops_blank_description() -> TestResult {
        let valid = product("999.99", 3)?.validated()?;

        assert_eq!(valid.name, "Laptop");
        assert_eq!(valid.description, None);
        assert_eq!(valid.stock_quantity, 3);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> TestResult {
        let result = product("-0.01", 1)?.validated();

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn price_with_three_decimals_is_rejected() -> TestResult {
        let result = product("1.005", 1)?.validated();

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() -> TestResult {
        let valid = product("10.500", 1)?.validated()?;

        assert_eq!(valid.price, Decimal::from_str("10.5")?);

        Ok(())
    }

    #[test]
    fn blank_path_segment_is_rejected() -> TestResult {
        let result = NewProduct {
            category: ProductCategory::Path(vec!["Bakery".to_string(), String::new()]),
            ..product("1.00", 1)?
        }
        .validated();

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::InvalidPath(InvalidCategoryPath::BlankSegment(1)))
            ),
            "expected InvalidPath, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn negative_stock_is_rejected() -> TestResult {
        let result = product("1.00", -1)?.validated();

        assert!(
            matches!(result, Err(ProductsServiceError::NegativeStock)),
            "expected NegativeStock, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn oversized_price_is_rejected() -> TestResult {
        let result = product("100000000.00", 1)?.validated();

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }
}
