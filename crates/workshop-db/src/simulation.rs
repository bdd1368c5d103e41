//! # Order Simulation
//!
//! Records service orders and takes the sold quantity out of stock.
//!
//! ## One Order Line
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION                                    │
//! │                                                                         │
//! │  1. Link the first inventory row with that name (item_id, or NULL)     │
//! │                                                                         │
//! │  2. INSERT INTO orders (customer_id, item_id, item_name, ...)          │
//! │                                                                         │
//! │  3. UPDATE inventory_items SET quantity = quantity - ? WHERE name = ?  │
//! │                                                                         │
//! │  COMMIT ← both writes land or neither does                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A name that matches no item still records the order; no stock moves and
//! the row's `item_id` stays NULL. A name shared by several items takes stock
//! out of every one of them.
//!
//! ## Multi-Line Service Orders
//! A [`ServiceOrder`] is recorded line by line inside one transaction, each
//! line behaving like one order above. Every row carries the order's
//! aggregate total (see `workshop_core::order`).
//!
//! The customer id is taken as given: recording an order for a customer that
//! was never registered succeeds.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::{customer::CustomerRepository, inventory, order};
use workshop_core::{
    CoreError, CustomerId, ItemId, Money, NewOrder, Order, OrderLine, ServiceOrder,
};

/// Records orders and the matching stock movements.
#[derive(Debug, Clone)]
pub struct OrderSimulator {
    pool: SqlitePool,
}

impl OrderSimulator {
    /// Creates a new OrderSimulator.
    pub fn new(pool: SqlitePool) -> Self {
        OrderSimulator { pool }
    }

    /// Records one order line under `item_name` and takes `quantity` out of
    /// every inventory item with that name.
    ///
    /// `total` is stored as given. An unknown name is not an error: the order
    /// row is written with `item_id = None` and no stock moves.
    pub async fn record_order(
        &self,
        customer_id: CustomerId,
        item_name: &str,
        quantity: i64,
        total: Money,
    ) -> DbResult<Order> {
        let mut tx = self.begin().await?;

        let item_id = inventory::find_by_name_with(&mut *tx, item_name)
            .await?
            .map(|item| item.id);

        let new_order = NewOrder {
            customer_id,
            item_id,
            item_name: item_name.to_string(),
            quantity,
            total,
        };
        let recorded = record_with(&mut *tx, &new_order).await?;

        commit(tx).await?;
        Ok(recorded)
    }

    /// Records one order line for the item with id `item_id`.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No inventory item has that id; nothing is written
    /// * `DbError::Core` - `quantity` is `i64::MIN`; nothing is written
    pub async fn record_order_for_item(
        &self,
        customer_id: CustomerId,
        item_id: ItemId,
        quantity: i64,
        total: Money,
    ) -> DbResult<Order> {
        let delta = quantity
            .checked_neg()
            .ok_or(CoreError::QuantityOutOfRange { quantity })?;

        let mut tx = self.begin().await?;

        let item = inventory::get_by_id_with(&mut *tx, item_id)
            .await?
            .ok_or_else(|| DbError::not_found("InventoryItem", item_id))?;

        let new_order = NewOrder {
            customer_id,
            item_id: Some(item.id),
            item_name: item.name,
            quantity,
            total,
        };
        let recorded = order::insert_with(&mut *tx, &new_order).await?;
        inventory::adjust_stock_with(&mut *tx, item.id, delta).await?;

        commit(tx).await?;
        Ok(recorded)
    }

    /// Builds a service order from `(item name, quantity)` pairs, pricing
    /// each line at the item's current sale price.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - One of the names matches no inventory item
    /// * `DbError::Core` - The order total does not fit in `i64` cents
    pub async fn draft_service_order(
        &self,
        customer_id: CustomerId,
        lines: &[(&str, i64)],
    ) -> DbResult<ServiceOrder> {
        let mut conn = self.pool.acquire().await?;
        let mut draft = ServiceOrder::new(customer_id);

        for (name, quantity) in lines {
            let item = inventory::find_by_name_with(&mut *conn, name)
                .await?
                .ok_or_else(|| DbError::not_found("InventoryItem", *name))?;
            let unit_price = item.sale_price();
            draft.push_line(OrderLine::new(item.id, item.name, *quantity, unit_price));
        }

        let total = draft.total()?;
        debug!(
            customer_id = customer_id,
            lines = draft.lines.len(),
            total = %total,
            "Drafted service order"
        );
        Ok(draft)
    }

    /// Records every line of a service order in one transaction.
    ///
    /// Each resulting row carries `service_order.total()`. If any line fails
    /// (for example an item id that no longer exists) no row is written and
    /// no stock moves.
    ///
    /// ## Errors
    /// * `DbError::Core` - The order total does not fit in `i64` cents
    /// * `DbError::ForeignKeyViolation` - A line names an item id that is gone
    pub async fn record_service_order(&self, service_order: &ServiceOrder) -> DbResult<Vec<Order>> {
        let total = service_order.total()?;
        let rows = service_order.order_rows()?;

        let mut tx = self.begin().await?;
        let mut recorded = Vec::with_capacity(rows.len());

        for row in &rows {
            recorded.push(record_with(&mut *tx, row).await?);
        }

        commit(tx).await?;

        info!(
            customer_id = service_order.customer_id,
            lines = recorded.len(),
            total = %total,
            "Service order recorded"
        );
        Ok(recorded)
    }

    /// Intake date shown alongside the order form.
    pub async fn intake_date(&self, customer_id: CustomerId) -> DbResult<Option<NaiveDate>> {
        CustomerRepository::new(self.pool.clone())
            .intake_date(customer_id)
            .await
    }

    async fn begin(&self) -> DbResult<sqlx::Transaction<'static, sqlx::Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

/// Inserts the order row and takes its quantity out of every item sharing
/// its name.
async fn record_with(conn: &mut SqliteConnection, new_order: &NewOrder) -> DbResult<Order> {
    let recorded = order::insert_with(conn, new_order).await?;
    let moved =
        inventory::decrement_by_name_with(conn, &new_order.item_name, new_order.quantity).await?;

    if moved == 0 {
        warn!(
            item_name = %new_order.item_name,
            order_id = recorded.id,
            "No inventory item with this name, stock unchanged"
        );
    }
    Ok(recorded)
}

async fn commit(tx: sqlx::Transaction<'static, sqlx::Sqlite>) -> DbResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
