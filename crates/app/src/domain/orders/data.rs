//! Orders Data

use std::fmt;

use crate::domain::{
    orders::{
        errors::OrdersServiceError,
        records::{OrderStatus, OrderUuid},
    },
    products::records::ProductUuid,
    validation::required_text,
};

/// One requested product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub notes: Option<String>,
    pub items: Vec<NewOrderLine>,
}

/// Order Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub notes: Option<String>,
}

impl OrderUpdate {
    pub(crate) fn normalised(self) -> Self {
        Self {
            notes: self.notes.and_then(|notes| required_text(&notes)),
            ..self
        }
    }
}

/// Why a single order line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineProblem {
    NonPositiveQuantity,
    UnknownProduct,
    InsufficientStock { requested: u32, available: u32 },
}

impl fmt::Display for LineProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveQuantity => f.write_str("quantity must be positive"),
            Self::UnknownProduct => f.write_str("product does not exist"),
            Self::InsufficientStock {
                requested,
                available,
            } => write!(
                f,
                "insufficient stock: requested {requested}, available {available}"
            ),
        }
    }
}

/// A rejected order line and its position in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub index: usize,
    pub product_uuid: ProductUuid,
    pub problem: LineProblem,
}

/// An order line that passed shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidLine {
    pub index: usize,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

impl NewOrder {
    /// Checks the order's shape before any row is touched.
    ///
    /// A product may appear on several lines; stock is checked against their sum.
    pub(crate) fn validated_lines(&self) -> Result<Vec<ValidLine>, OrdersServiceError> {
        if self.items.is_empty() {
            return Err(OrdersServiceError::Validation(
                "an order needs at least one item".to_string(),
            ));
        }

        let mut errors = Vec::new();
        let mut lines = Vec::with_capacity(self.items.len());

        for (index, line) in self.items.iter().enumerate() {
            let reject = |problem| LineError {
                index,
                product_uuid: line.product_uuid,
                problem,
            };

            let Some(quantity) = u32::try_from(line.quantity).ok().filter(|q| *q > 0) else {
                errors.push(reject(LineProblem::NonPositiveQuantity));
                continue;
            };

            lines.push(ValidLine {
                index,
                product_uuid: line.product_uuid,
                quantity,
            });
        }

        if errors.is_empty() {
            Ok(lines)
        } else {
            Err(OrdersServiceError::InvalidLines(errors))
        }
    }
}
