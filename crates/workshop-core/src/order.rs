//! # Service Order Composition
//!
//! Pure assembly of a multi-line service order before it is recorded.
//!
//! ## Total Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Lines:   ("A", qty 2, unit 10.00)   ("B", qty 1, unit 5.00)           │
//! │                                                                         │
//! │  total() = 2 × 10.00 + 1 × 5.00 = 25.00                                │
//! │                                                                         │
//! │  order_rows():                                                          │
//! │    Order { item: "A", quantity: 2, total: 25.00 }                      │
//! │    Order { item: "B", quantity: 1, total: 25.00 }                      │
//! │                       ▲                                                 │
//! │                       └── every row carries the whole-order total      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows carry the aggregate total rather than a per-line amount. Summing
//! `total` over the rows of one service order therefore over-counts; use
//! [`ServiceOrder::total`] or [`OrderLine::line_total`] for the real figures.
//!
//! Totals are computed with checked arithmetic and fail with
//! `CoreError::AmountOutOfRange` instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CustomerId, ItemId, NewOrder};

/// One line of a service order: an item, how many, and its unit price at the
/// time the order was drafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn new(
        item_id: ItemId,
        item_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Self {
        OrderLine {
            item_id,
            item_name: item_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> CoreResult<Money> {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A multi-line order for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
}

impl ServiceOrder {
    pub fn new(customer_id: CustomerId) -> Self {
        ServiceOrder {
            customer_id,
            lines: Vec::new(),
        }
    }

    /// Appends a line and returns the order for chaining.
    pub fn with_line(mut self, line: OrderLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn push_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ quantity × unit price over every line.
    pub fn total(&self) -> CoreResult<Money> {
        self.lines
            .iter()
            .try_fold(Money::zero(), |sum, line| sum.checked_add(line.line_total()?))
    }

    /// The order rows to persist, one per line, each stamped with the
    /// aggregate [`total`](Self::total).
    pub fn order_rows(&self) -> CoreResult<Vec<NewOrder>> {
        let total = self.total()?;
        Ok(self
            .lines
            .iter()
            .map(|line| NewOrder {
                customer_id: self.customer_id,
                item_id: Some(line.item_id),
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                total,
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn two_line_order() -> ServiceOrder {
        ServiceOrder::new(3)
            .with_line(OrderLine::new(1, "A", 2, Money::from_cents(1000)))
            .with_line(OrderLine::new(2, "B", 1, Money::from_cents(500)))
    }

    #[test]
    fn test_total_sums_every_line() {
        let order = two_line_order();
        assert_eq!(order.total(), Ok(Money::from_cents(2500)));
        assert_eq!(order.lines[0].line_total(), Ok(Money::from_cents(2000)));
        assert_eq!(order.lines[1].line_total(), Ok(Money::from_cents(500)));
    }

    #[test]
    fn test_rows_repeat_aggregate_total() {
        let rows = two_line_order().order_rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_id, Some(1));
        assert_eq!(rows[0].item_name, "A");
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[1].item_name, "B");
        assert_eq!(rows[1].quantity, 1);
        for row in &rows {
            assert_eq!(row.customer_id, 3);
            assert_eq!(row.total, Money::from_cents(2500));
        }
    }

    #[test]
    fn test_empty_order() {
        let order = ServiceOrder::new(1);
        assert!(order.is_empty());
        assert!(order.total().unwrap().is_zero());
        assert!(order.order_rows().unwrap().is_empty());
    }

    #[test]
    fn test_push_line_keeps_input_as_is() {
        let mut order = ServiceOrder::new(1);
        order.push_line(OrderLine::new(9, "", -4, Money::from_cents(250)));
        assert_eq!(order.total(), Ok(Money::from_cents(-1000)));
    }

    #[test]
    fn test_overflowing_order_has_no_total() {
        let order = ServiceOrder::new(1)
            .with_line(OrderLine::new(1, "A", 1, Money::from_cents(i64::MAX)))
            .with_line(OrderLine::new(2, "B", 1, Money::from_cents(1)));

        assert_eq!(order.total(), Err(CoreError::AmountOutOfRange));
        assert_eq!(order.order_rows(), Err(CoreError::AmountOutOfRange));

        let line = OrderLine::new(3, "C", i64::MAX, Money::from_cents(2));
        assert_eq!(line.line_total(), Err(CoreError::AmountOutOfRange));
    }
}
