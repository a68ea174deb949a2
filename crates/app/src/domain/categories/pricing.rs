//! Price aggregation over a set of products.

use rust_decimal::Decimal;

/// Decimal places used for currency amounts.
pub const PRICE_SCALE: u32 = 2;

/// Sum and count of a set of prices with their rounded mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSummary {
    pub average: Decimal,
    pub count: u64,
}

impl PriceSummary {
    /// Mean of `count` prices adding up to `sum`, rounded half-to-even.
    ///
    /// No prices yields a zero average rather than an error.
    #[must_use]
    pub fn from_totals(sum: Decimal, count: u64) -> Self {
        let mut average = if count == 0 {
            Decimal::ZERO
        } else {
            sum.checked_div(Decimal::from(count))
                .unwrap_or_default()
                .round_dp(PRICE_SCALE)
        };

        average.rescale(PRICE_SCALE);

        Self { average, count }
    }

    #[must_use]
    pub fn from_prices(prices: &[Decimal]) -> Self {
        let sum = prices.iter().copied().sum();
        let count = u64::try_from(prices.len()).unwrap_or(u64::MAX);

        Self::from_totals(sum, count)
    }

    #[must_use]
    pub const fn has_products(&self) -> bool {
        self.count > 0
    }
}
