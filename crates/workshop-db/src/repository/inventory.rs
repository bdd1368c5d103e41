//! # Inventory Repository
//!
//! Database operations for parts held in stock.
//!
//! ## Name Lookups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item names are not unique. Two rows may share a name:                  │
//! │                                                                         │
//! │    id 3 | Brake Pad | qty 10 | sale 50.00   ← first match (lowest id)  │
//! │    id 8 | Brake Pad | qty  4 | sale 55.00                              │
//! │                                                                         │
//! │  find_by_name / sale_price always resolve to the lowest id.            │
//! │  An order placed by name takes stock out of BOTH rows.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Updates
//! Stock is changed with delta updates (`quantity = quantity + ?`) and has no
//! lower bound: selling more than is on hand drives the quantity negative.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use workshop_core::{InventoryItem, ItemId, Money, NewInventoryItem};

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Registers an item and returns the stored row.
    ///
    /// Duplicate names are accepted.
    pub async fn insert(&self, item: &NewInventoryItem) -> DbResult<InventoryItem> {
        debug!(name = %item.name, quantity = item.quantity, "Inserting inventory item");

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_items (
                name, quantity, purchase_price_cents, sale_price_cents
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.purchase_price.cents())
        .bind(item.sale_price.cents())
        .execute(&self.pool)
        .await?;

        Ok(InventoryItem {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            quantity: item.quantity,
            purchase_price_cents: item.purchase_price.cents(),
            sale_price_cents: item.sale_price.cents(),
        })
    }

    /// Lists every item in insertion order.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, quantity, purchase_price_cents, sale_price_cents
            FROM inventory_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed inventory items");
        Ok(items)
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Option<InventoryItem>> {
        let mut conn = self.pool.acquire().await?;
        get_by_id_with(&mut *conn, id).await
    }

    /// Gets the first item with exactly this name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<InventoryItem>> {
        let mut conn = self.pool.acquire().await?;
        find_by_name_with(&mut *conn, name).await
    }

    /// Returns the sale price of the first item with this name.
    ///
    /// ## Returns
    /// * `Ok(Some(price))` - At least one item matched
    /// * `Ok(None)` - No item has that name
    pub async fn sale_price(&self, name: &str) -> DbResult<Option<Money>> {
        let cents = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT sale_price_cents
            FROM inventory_items
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cents.map(Money::from_cents))
    }

    /// Changes the stock of one item by `delta` (negative for sales,
    /// positive for restocking).
    pub async fn adjust_stock(&self, id: ItemId, delta: i64) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        adjust_stock_with(&mut *conn, id, delta).await
    }

    /// Counts registered items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers (shared with the order simulator's transactions)
// =============================================================================

pub(crate) async fn get_by_id_with(
    conn: &mut SqliteConnection,
    id: ItemId,
) -> DbResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, name, quantity, purchase_price_cents, sale_price_cents
        FROM inventory_items
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(item)
}

pub(crate) async fn find_by_name_with(
    conn: &mut SqliteConnection,
    name: &str,
) -> DbResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, name, quantity, purchase_price_cents, sale_price_cents
        FROM inventory_items
        WHERE name = ?1
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(item)
}

pub(crate) async fn adjust_stock_with(
    conn: &mut SqliteConnection,
    id: ItemId,
    delta: i64,
) -> DbResult<()> {
    debug!(id = id, delta = delta, "Updating stock");

    let result = sqlx::query(
        r#"
        UPDATE inventory_items
        SET quantity = quantity + ?2
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(delta)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("InventoryItem", id));
    }

    Ok(())
}

/// Takes `quantity` out of every item named `name`. Returns how many rows
/// moved; zero when the name matches nothing.
pub(crate) async fn decrement_by_name_with(
    conn: &mut SqliteConnection,
    name: &str,
    quantity: i64,
) -> DbResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE inventory_items
        SET quantity = quantity - ?2
        WHERE name = ?1
        "#,
    )
    .bind(name)
    .bind(quantity)
    .execute(conn)
    .await?;

    debug!(
        name = %name,
        quantity = quantity,
        rows = result.rows_affected(),
        "Decremented stock by name"
    );
    Ok(result.rows_affected())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn brake_pad(qty: i64) -> NewInventoryItem {
        NewInventoryItem::new(
            "Brake Pad",
            qty,
            Money::from_cents(2500),
            Money::from_cents(5000),
        )
    }

    #[tokio::test]
    async fn test_insert_then_list_keeps_quantity_exactly() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();

        let inserted = repo.insert(&brake_pad(10)).await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(items, vec![inserted.clone()]);
        assert_eq!(items[0].quantity, 10);
        assert_eq!(items[0].purchase_price(), Money::from_cents(2500));
        assert_eq!(items[0].sale_price(), Money::from_cents(5000));
    }

    #[tokio::test]
    async fn test_sale_price_first_match_wins() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();

        let first = repo.insert(&brake_pad(10)).await.unwrap();
        repo.insert(&NewInventoryItem::new(
            "Brake Pad",
            4,
            Money::from_cents(2600),
            Money::from_cents(5500),
        ))
        .await
        .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(
            repo.sale_price("Brake Pad").await.unwrap(),
            Some(Money::from_cents(5000))
        );
        assert_eq!(
            repo.find_by_name("Brake Pad").await.unwrap().map(|i| i.id),
            Some(first.id)
        );
    }

    #[tokio::test]
    async fn test_sale_price_unknown_name_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&brake_pad(1)).await.unwrap();

        assert_eq!(repo.sale_price("Spark Plug").await.unwrap(), None);
        assert_eq!(repo.sale_price("brake pad").await.unwrap(), None);
        assert!(repo.find_by_name("Spark Plug").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_adjust_stock_has_no_floor() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        let item = repo.insert(&brake_pad(2)).await.unwrap();

        repo.adjust_stock(item.id, -5).await.unwrap();
        assert_eq!(repo.get_by_id(item.id).await.unwrap().unwrap().quantity, -3);

        repo.adjust_stock(item.id, 10).await.unwrap();
        assert_eq!(repo.get_by_id(item.id).await.unwrap().unwrap().quantity, 7);
    }

    #[tokio::test]
    async fn test_adjust_stock_unknown_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.inventory().adjust_stock(404, -1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_decrement_by_name_hits_every_match() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        let first = repo.insert(&brake_pad(10)).await.unwrap();
        let second = repo.insert(&brake_pad(4)).await.unwrap();

        let moved = {
            let mut conn = db.pool().acquire().await.unwrap();
            let moved = decrement_by_name_with(&mut *conn, "Brake Pad", 3).await.unwrap();
            let none = decrement_by_name_with(&mut *conn, "Brake Pads", 3).await.unwrap();
            assert_eq!(none, 0);
            moved
        };

        assert_eq!(moved, 2);
        assert_eq!(repo.get_by_id(first.id).await.unwrap().unwrap().quantity, 7);
        assert_eq!(repo.get_by_id(second.id).await.unwrap().unwrap().quantity, 1);
    }
}
