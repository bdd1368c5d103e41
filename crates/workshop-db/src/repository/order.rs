//! # Order Repository
//!
//! Read access to recorded order rows.
//!
//! Orders are written only by [`OrderSimulator`](crate::simulation::OrderSimulator),
//! which pairs every insert with a stock decrement inside one transaction.
//! The insert helper here is therefore crate-private.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use workshop_core::{CustomerId, NewOrder, Order, OrderId};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists every order row in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, item_id, item_name, quantity, total_cents
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// Lists the order rows recorded for one customer.
    pub async fn list_for_customer(&self, customer_id: CustomerId) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, item_id, item_name, quantity, total_cents
            FROM orders
            WHERE customer_id = ?1
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets an order row by ID.
    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, item_id, item_name, quantity, total_cents
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Counts order rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts one order row on the given connection.
pub(crate) async fn insert_with(conn: &mut SqliteConnection, order: &NewOrder) -> DbResult<Order> {
    debug!(
        customer_id = order.customer_id,
        item_id = ?order.item_id,
        quantity = order.quantity,
        total = %order.total,
        "Inserting order"
    );

    let result = sqlx::query(
        r#"
        INSERT INTO orders (
            customer_id, item_id, item_name, quantity, total_cents
        ) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(order.customer_id)
    .bind(order.item_id)
    .bind(&order.item_name)
    .bind(order.quantity)
    .bind(order.total.cents())
    .execute(conn)
    .await?;

    Ok(Order {
        id: result.last_insert_rowid(),
        customer_id: order.customer_id,
        item_id: order.item_id,
        item_name: order.item_name.clone(),
        quantity: order.quantity,
        total_cents: order.total.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use workshop_core::{Money, NewInventoryItem};

    #[tokio::test]
    async fn test_insert_requires_existing_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        let order = NewOrder {
            customer_id: 1,
            item_id: Some(999),
            item_name: "Ghost Part".to_string(),
            quantity: 1,
            total: Money::from_cents(100),
        };
        let err = insert_with(&mut *conn, &order).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_without_item_link() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let order = NewOrder {
            customer_id: 1,
            item_id: None,
            item_name: "Typo Part".to_string(),
            quantity: 1,
            total: Money::from_cents(100),
        };
        let inserted = {
            let mut conn = db.pool().acquire().await.unwrap();
            insert_with(&mut *conn, &order).await.unwrap()
        };

        assert_eq!(inserted.item_id, None);
        assert_eq!(db.orders().list().await.unwrap(), vec![inserted]);
    }

    #[tokio::test]
    async fn test_list_for_customer_filters_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = db
            .inventory()
            .insert(&NewInventoryItem::new(
                "Chain",
                5,
                Money::from_cents(8000),
                Money::from_cents(12000),
            ))
            .await
            .unwrap();

        {
            let mut conn = db.pool().acquire().await.unwrap();
            for customer_id in [1, 2, 1] {
                let order = NewOrder {
                    customer_id,
                    item_id: Some(item.id),
                    item_name: item.name.clone(),
                    quantity: 1,
                    total: item.sale_price(),
                };
                insert_with(&mut *conn, &order).await.unwrap();
            }
        }

        let repo = db.orders();
        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.list_for_customer(1).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_customer(2).await.unwrap().len(), 1);
        assert!(repo.list_for_customer(3).await.unwrap().is_empty());

        let first = repo.list().await.unwrap().remove(0);
        assert_eq!(repo.get_by_id(first.id).await.unwrap(), Some(first));
    }
}
