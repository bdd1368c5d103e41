//! # Domain Types
//!
//! Row types for the three workshop tables, plus the `New*` input structs the
//! registration forms fill in.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │  InventoryItem  │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄┐ │  id             │◄──│  item_id (FK?)  │       │
//! │  │  name           │ │ │  name           │   │  item_name      │       │
//! │  │  phone, email   │ └─│─────────────────│───│  customer_id    │       │
//! │  │  intake_date    │   │  quantity       │   │  quantity       │       │
//! │  │                 │   │  purchase/sale  │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Order.customer_id` is not checked against the customers table.
//! `Order.item_name` is the name the order was placed under; `item_id` links
//! it to the first inventory item with that name when one existed at the time,
//! and is `None` otherwise.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Customer identifier (SQLite rowid).
pub type CustomerId = i64;

/// Inventory item identifier (SQLite rowid).
pub type ItemId = i64;

/// Order identifier (SQLite rowid).
pub type OrderId = i64;

// =============================================================================
// Customer
// =============================================================================

/// A registered workshop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Date the customer's vehicle entered the workshop.
    pub intake_date: NaiveDate,
}

/// Input for customer registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub intake_date: NaiveDate,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        intake_date: NaiveDate,
    ) -> Self {
        NewCustomer {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            intake_date,
        }
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A part held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    /// Quantity on hand. Orders decrement it with no lower bound.
    pub quantity: i64,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
}

impl InventoryItem {
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

/// Input for inventory registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub quantity: i64,
    pub purchase_price: Money,
    pub sale_price: Money,
}

impl NewInventoryItem {
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        purchase_price: Money,
        sale_price: Money,
    ) -> Self {
        NewInventoryItem {
            name: name.into(),
            quantity,
            purchase_price,
            sale_price,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// One recorded order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// Inventory item the order was resolved to, if any.
    pub item_id: Option<ItemId>,
    /// Item name as given when the order was recorded.
    pub item_name: String,
    pub quantity: i64,
    /// Total passed in by the caller; never recomputed from price × quantity.
    pub total_cents: i64,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Input for recording one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub item_id: Option<ItemId>,
    pub item_name: String,
    pub quantity: i64,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_price_accessors() {
        let item = InventoryItem {
            id: 1,
            name: "Brake Pad".to_string(),
            quantity: 10,
            purchase_price_cents: 2550,
            sale_price_cents: 5000,
        };
        assert_eq!(item.purchase_price(), Money::from_cents(2550));
        assert_eq!(item.sale_price().to_string(), "50.00");
    }

    #[test]
    fn test_customer_serializes_intake_date_as_iso() {
        let customer = Customer {
            id: 7,
            name: "Ana".to_string(),
            phone: "11 99999-0000".to_string(),
            email: "ana@example.com".to_string(),
            intake_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["intake_date"], "2024-03-15");
        assert_eq!(json["id"], 7);
    }
}
