//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Placement Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Placement                                    │
//! │                                                                         │
//! │  place(order, items)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                     │
//! │       ├── INSERT INTO orders (header)                                  │
//! │       ├── INSERT INTO order_items (item 1)                             │
//! │       ├── INSERT INTO order_items (item 2)                             │
//! │       ├── ...                                                           │
//! │       ▼                                                                 │
//! │  COMMIT  ── any failure before this point rolls the WHOLE order back.  │
//! │                                                                         │
//! │  There is no observable state with a header and missing items, or      │
//! │  items without a header.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items are frozen snapshots of the product at order time and are
//! never updated afterwards.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::{Customer, Order, OrderItem, OrderStatus};

/// Raw order row; the customer record is still JSON TEXT.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer: String,
    subtotal_cents: i64,
    tax_cents: i64,
    shipping_cents: i64,
    total_cents: i64,
    payment_method: String,
    order_date: chrono::DateTime<chrono::Utc>,
    status: OrderStatus,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRow {
    fn into_order(self) -> StoreResult<Order> {
        let customer: Customer = serde_json::from_str(&self.customer)
            .map_err(|e| StoreError::corrupt("Order.customer", e.to_string()))?;

        Ok(Order {
            id: self.id,
            customer,
            subtotal_cents: self.subtotal_cents,
            tax_cents: self.tax_cents,
            shipping_cents: self.shipping_cents,
            total_cents: self.total_cents,
            payment_method: self.payment_method,
            order_date: self.order_date,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = r#"
    id, customer,
    subtotal_cents, tax_cents, shipping_cents, total_cents,
    payment_method, order_date, status,
    created_at, updated_at
"#;

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

    /// Persists an order header and all of its line items atomically.
    ///
    /// A failure on any insert rolls back everything already written; the
    /// transaction guard rolls back on drop if `commit` is never reached.
    pub async fn place(&self, order: &Order, items: &[OrderItem]) -> StoreResult<()> {
        debug!(id = %order.id, item_count = items.len(), "Placing order");

        let customer = serde_json::to_string(&order.customer)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer,
                subtotal_cents, tax_cents, shipping_cents, total_cents,
                payment_method, order_date, status,
                created_at, updated_at
            ) VALUES (
                ?1, ?2,
                ?3, ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11
            )
            "#,
        )
        .bind(&order.id)
        .bind(customer)
        .bind(order.subtotal_cents)
        .bind(order.tax_cents)
        .bind(order.shipping_cents)
        .bind(order.total_cents)
        .bind(&order.payment_method)
        .bind(order.order_date)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id,
                    name, price_cents, quantity,
                    color, size, image,
                    created_at
                ) VALUES (
                    ?1, ?2, ?3,
                    ?4, ?5, ?6,
                    ?7, ?8, ?9,
                    ?10
                )
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.price_cents)
            .bind(item.quantity)
            .bind(&item.color)
            .bind(item.size)
            .bind(&item.image)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order header by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?1", ORDER_COLUMNS);

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Gets all line items for an order.
    pub async fn get_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                id, order_id, product_id,
                name, price_cents, quantity,
                color, size, image,
                created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists order headers, optionally filtered.
    ///
    /// ## Filters
    /// * `status` - exact match on order status
    /// * `city` - exact match on the customer's city (extracted from the
    ///   JSON customer record); no other customer field is filterable
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        city: Option<&str>,
    ) -> StoreResult<Vec<Order>> {
        let mut sql = format!("SELECT {} FROM orders WHERE 1=1", ORDER_COLUMNS);
        if status.is_some() {
            sql.push_str(" AND status = ?");
        }
        if city.is_some() {
            sql.push_str(" AND json_extract(customer, '$.city') = ?");
        }
        sql.push_str(" ORDER BY created_at");

        let mut query = sqlx::query_as::<_, OrderRow>(&sql);
        if let Some(status) = status {
            query = query.bind(status.as_str());
        }
        if let Some(city) = city {
            query = query.bind(city);
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Overwrites an order's status unconditionally.
    ///
    /// No transition validation: any status may replace any other, and
    /// writing the current status again is a no-op that still succeeds.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> StoreResult<()> {
        debug!(id = %id, status = %status, "Updating order status");

        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", id));
        }

        Ok(())
    }

    /// Deletes an order; its items cascade via schema FK.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts all orders (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all order items (for diagnostics and tests).
    pub async fn count_items(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::generate_id;
    use chrono::Utc;

    fn customer(city: &str) -> Customer {
        Customer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            city: city.to_string(),
            state: "LDN".to_string(),
            zip_code: "N1".to_string(),
            country: "UK".to_string(),
        }
    }

    fn order(city: &str) -> Order {
        let now = Utc::now();
        Order {
            id: generate_id(),
            customer: customer(city),
            subtotal_cents: 25998,
            tax_cents: 2145,
            shipping_cents: 500,
            total_cents: 28643,
            payment_method: "card".to_string(),
            order_date: now,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    fn item(order_id: &str, name: &str) -> OrderItem {
        OrderItem {
            id: generate_id(),
            order_id: order_id.to_string(),
            product_id: generate_id(),
            name: name.to_string(),
            price_cents: 12999,
            quantity: 1,
            color: "Black".to_string(),
            size: 9.5,
            image: "https://cdn.example.com/a.jpg".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_place_order_with_three_items() {
        let db = test_db().await;
        let repo = db.orders();

        let o = order("London");
        let items = vec![
            item(&o.id, "Trail Runner"),
            item(&o.id, "City Walker"),
            item(&o.id, "Court Classic"),
        ];
        repo.place(&o, &items).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.count_items().await.unwrap(), 3);

        let stored_items = repo.get_items(&o.id).await.unwrap();
        assert_eq!(stored_items.len(), 3);
        assert!(stored_items.iter().all(|i| i.order_id == o.id));

        let header = repo.get_by_id(&o.id).await.unwrap().unwrap();
        assert_eq!(header.status, OrderStatus::Pending);
        assert_eq!(header.customer.city, "London");
    }

    #[tokio::test]
    async fn test_failed_item_insert_rolls_back_everything() {
        let db = test_db().await;
        let repo = db.orders();

        let o = order("London");
        let good = item(&o.id, "Trail Runner");
        // Same primary key as the first item: the second insert must fail
        let mut clash = item(&o.id, "City Walker");
        clash.id = good.id.clone();

        let err = repo.place(&o, &[good, clash]).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        // Nothing survives the rollback: no header, no items
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.count_items().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_item_snapshots_are_frozen() {
        let db = test_db().await;

        // A real product the snapshot was taken from
        let now = Utc::now();
        let mut product = velora_core::Product {
            id: generate_id(),
            title: "Trail Runner".to_string(),
            description: None,
            price_cents: 12999,
            main_category_id: "m".to_string(),
            sub_category_id: "s".to_string(),
            sub_group_id: "g".to_string(),
            colors: vec!["Black".to_string()],
            sizes: vec![9.5],
            assets: vec!["https://cdn.example.com/a.jpg".to_string()],
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();

        let o = order("London");
        let mut snap = item(&o.id, "Trail Runner");
        snap.product_id = product.id.clone();
        db.orders().place(&o, &[snap.clone()]).await.unwrap();

        // Mutate the product after the sale
        product.title = "Trail Runner V2".to_string();
        product.price_cents = 15999;
        db.products().update(&product).await.unwrap();

        // The snapshot is untouched
        let stored = db.orders().get_items(&o.id).await.unwrap();
        assert_eq!(stored[0].name, "Trail Runner");
        assert_eq!(stored[0].price_cents, 12999);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = test_db().await;
        let repo = db.orders();

        let london = order("London");
        repo.place(&london, &[item(&london.id, "A")]).await.unwrap();

        let paris = order("Paris");
        repo.place(&paris, &[item(&paris.id, "B")]).await.unwrap();
        repo.update_status(&paris.id, OrderStatus::Shipped).await.unwrap();

        assert_eq!(repo.list(None, None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some(OrderStatus::Shipped), None).await.unwrap().len(), 1);
        assert_eq!(repo.list(None, Some("London")).await.unwrap().len(), 1);
        assert_eq!(
            repo.list(Some(OrderStatus::Shipped), Some("Paris")).await.unwrap().len(),
            1
        );
        assert_eq!(
            repo.list(Some(OrderStatus::Shipped), Some("London")).await.unwrap().len(),
            0
        );
    }

    #[tokio::test]
    async fn test_update_status_unconstrained_and_idempotent() {
        let db = test_db().await;
        let repo = db.orders();

        let o = order("London");
        repo.place(&o, &[item(&o.id, "A")]).await.unwrap();

        // Terminal → non-terminal is allowed: no state machine here
        repo.update_status(&o.id, OrderStatus::Delivered).await.unwrap();
        repo.update_status(&o.id, OrderStatus::Pending).await.unwrap();

        // Idempotent: same value twice, same final state
        repo.update_status(&o.id, OrderStatus::Cancelled).await.unwrap();
        repo.update_status(&o.id, OrderStatus::Cancelled).await.unwrap();

        let header = repo.get_by_id(&o.id).await.unwrap().unwrap();
        assert_eq!(header.status, OrderStatus::Cancelled);

        let err = repo.update_status("missing", OrderStatus::Shipped).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let db = test_db().await;
        let repo = db.orders();

        let o = order("London");
        repo.place(&o, &[item(&o.id, "A"), item(&o.id, "B")]).await.unwrap();

        repo.delete(&o.id).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.count_items().await.unwrap(), 0);
    }
}
