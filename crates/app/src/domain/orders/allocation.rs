//! Stock Allocation
//!
//! Matches validated order lines against the locked product rows: every line
//! must name a live product, lines for the same product must fit its stock
//! together, and each accepted line captures the product's current price.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::{
    orders::{
        data::{LineError, LineProblem, ValidLine},
        errors::OrdersServiceError,
    },
    products::records::ProductUuid,
};

/// A product row held under `FOR UPDATE` for the rest of the transaction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LockedProduct {
    pub uuid: ProductUuid,
    pub price: Decimal,
    pub stock_quantity: u32,
}

/// An order line with its price snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PricedLine {
    pub index: usize,
    pub position: u32,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Largest amount an order row can store (`NUMERIC(20, 2)`).
pub(crate) const MAX_ORDER_AMOUNT: Decimal =
    Decimal::from_parts(0x630F_FFFF, 0x6BC7_5E2D, 0x5, false, 2);

/// Price every line, or report each line that cannot be fulfilled.
///
/// Unknown products are reported ahead of stock shortages. A shortage is
/// reported on every line whose running total for its product exceeds stock.
pub(crate) fn allocate(
    lines: &[ValidLine],
    products: &[LockedProduct],
) -> Result<Vec<PricedLine>, OrdersServiceError> {
    let products: FxHashMap<ProductUuid, &LockedProduct> = products
        .iter()
        .map(|product| (product.uuid, product))
        .collect();

    let mut demand: FxHashMap<ProductUuid, u64> = FxHashMap::default();
    let mut unknown = Vec::new();
    let mut short = Vec::new();
    let mut priced = Vec::with_capacity(lines.len());

    for (position, line) in (1_u32..).zip(lines) {
        let Some(product) = products.get(&line.product_uuid) else {
            unknown.push(LineError {
                index: line.index,
                product_uuid: line.product_uuid,
                problem: LineProblem::UnknownProduct,
            });
            continue;
        };

        let requested = demand.entry(line.product_uuid).or_default();
        *requested += u64::from(line.quantity);

        if *requested > u64::from(product.stock_quantity) {
            short.push(LineError {
                index: line.index,
                product_uuid: line.product_uuid,
                problem: LineProblem::InsufficientStock {
                    requested: u32::try_from(*requested).unwrap_or(u32::MAX),
                    available: product.stock_quantity,
                },
            });
            continue;
        }

        priced.push(PricedLine {
            index: line.index,
            position,
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            unit_price: product.price,
            subtotal: product.price * Decimal::from(line.quantity),
        });
    }

    if !unknown.is_empty() {
        return Err(OrdersServiceError::InvalidLines(unknown));
    }

    if !short.is_empty() {
        return Err(OrdersServiceError::InsufficientStock(short));
    }

    if order_total(&priced) > MAX_ORDER_AMOUNT {
        return Err(OrdersServiceError::Validation(
            "order total exceeds the largest storable amount".to_string(),
        ));
    }

    Ok(priced)
}

/// Quantity to take from each product, in lock order, with the first line that asked for it.
pub(crate) fn stock_demand(lines: &[PricedLine]) -> Vec<(ProductUuid, u32, usize)> {
    let mut demand: Vec<(ProductUuid, u32, usize)> = Vec::new();

    for line in lines {
        match demand.iter_mut().find(|(product, ..)| *product == line.product_uuid) {
            Some((_, quantity, _)) => *quantity = quantity.saturating_add(line.quantity),
            None => demand.push((line.product_uuid, line.quantity, line.index)),
        }
    }

    demand.sort_by_key(|(product, ..)| *product);

    demand
}

/// Shortage reported when the guarded decrement finds less stock than was locked.
pub(crate) fn decrement_shortage(
    products: &[LockedProduct],
    product_uuid: ProductUuid,
    quantity: u32,
    index: usize,
) -> OrdersServiceError {
    let available = products
        .iter()
        .find(|product| product.uuid == product_uuid)
        .map_or(0, |product| product.stock_quantity);

    OrdersServiceError::InsufficientStock(vec![LineError {
        index,
        product_uuid,
        problem: LineProblem::InsufficientStock {
            requested: quantity,
            available,
        },
    }])
}

/// Sum of line subtotals. An empty order totals zero.
pub(crate) fn order_total(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(|line| line.subtotal).sum()
}
