//! Order placement service.
//!
//! Coordinates creation of an order header plus its line items as one
//! logical (and transactional) unit, serves filtered listings, and applies
//! unconditional status overwrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use velora_core::validation::{validate_item_count, validate_quantity};
use velora_core::{Customer, Order, OrderItem, OrderStatus, OrderTotals};
use velora_db::repository::generate_id;
use velora_db::Database;

use crate::error::ApiError;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Checkout payload. Field names are camelCase on the wire, matching the
/// storefront checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub customer: Customer,
    pub items: Vec<PlaceOrderItem>,
    pub totals: OrderTotals,
    pub payment_method: String,
    pub order_date: DateTime<Utc>,
}

/// One checkout line: the product snapshot as the storefront saw it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderItem {
    pub product_id: String,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub color: String,
    pub size: f64,
    pub image: String,
}

/// Listing filters: status equality and/or customer city equality. No other
/// customer field is filterable.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub area: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// A full order: header plus its items.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Order Service
// =============================================================================

/// Service coordinating order persistence.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
}

impl OrderService {
    /// Create a new order service.
    pub fn new(db: Database) -> Self {
        OrderService { db }
    }

    /// Places an order: header and all items in ONE transaction.
    ///
    /// A failure writing any item rolls the whole order back - there is no
    /// path that leaves a header without items or items without a header.
    /// Status always initializes to `pending` regardless of caller input.
    pub async fn place_order(&self, req: PlaceOrder) -> Result<OrderDetail, ApiError> {
        validate_item_count(req.items.len())?;
        for item in &req.items {
            validate_quantity(item.quantity)?;
        }

        // The store persists whatever totals the caller supplies; an
        // inconsistent sum is worth a trace but is not rejected.
        if !req.totals.is_consistent() {
            warn!(
                subtotal = req.totals.subtotal_cents,
                tax = req.totals.tax_cents,
                shipping = req.totals.shipping_cents,
                total = req.totals.total_cents,
                "order totals do not sum to total"
            );
        }

        let now = Utc::now();
        let order = Order {
            id: generate_id(),
            customer: req.customer,
            subtotal_cents: req.totals.subtotal_cents,
            tax_cents: req.totals.tax_cents,
            shipping_cents: req.totals.shipping_cents,
            total_cents: req.totals.total_cents,
            payment_method: req.payment_method,
            order_date: req.order_date,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let items: Vec<OrderItem> = req
            .items
            .into_iter()
            .map(|item| OrderItem {
                id: generate_id(),
                order_id: order.id.clone(),
                product_id: item.product_id,
                name: item.name,
                price_cents: item.price_cents,
                quantity: item.quantity,
                color: item.color,
                size: item.size,
                image: item.image,
                created_at: now,
            })
            .collect();

        self.db.orders().place(&order, &items).await?;

        info!(id = %order.id, items = items.len(), total_cents = order.total_cents, "Order placed");
        Ok(OrderDetail { order, items })
    }

    /// Lists order headers, optionally filtered by status and/or city.
    pub async fn list_orders(&self, filters: OrderFilters) -> Result<Vec<Order>, ApiError> {
        Ok(self
            .db
            .orders()
            .list(filters.status, filters.area.as_deref())
            .await?)
    }

    /// Fetches a full order (header + items).
    pub async fn get_order(&self, id: &str) -> Result<OrderDetail, ApiError> {
        let order = self
            .db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

        let items = self.db.orders().get_items(id).await?;

        Ok(OrderDetail { order, items })
    }

    /// Overwrites an order's status.
    ///
    /// No transition validation: any status may follow any other, and
    /// repeating a status is a successful no-op.
    pub async fn update_status(
        &self,
        id: &str,
        req: UpdateOrderStatus,
    ) -> Result<OrderDetail, ApiError> {
        self.db.orders().update_status(id, req.status).await?;
        self.get_order(id).await
    }

    /// Deletes an order; its items cascade.
    pub async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        self.db.orders().delete(id).await?;
        info!(id = %id, "Order deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use velora_db::DbConfig;

    async fn service() -> OrderService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        OrderService::new(db)
    }

    fn customer() -> Customer {
        Customer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "N1".to_string(),
            country: "UK".to_string(),
        }
    }

    fn item(name: &str) -> PlaceOrderItem {
        PlaceOrderItem {
            product_id: "p1".to_string(),
            name: name.to_string(),
            price_cents: 12999,
            quantity: 2,
            color: "Black".to_string(),
            size: 9.0,
            image: "https://cdn.example.com/a.jpg".to_string(),
        }
    }

    fn request(items: Vec<PlaceOrderItem>) -> PlaceOrder {
        PlaceOrder {
            customer: customer(),
            items,
            totals: OrderTotals {
                subtotal_cents: 25998,
                tax_cents: 2145,
                shipping_cents: 500,
                total_cents: 28643,
            },
            payment_method: "card".to_string(),
            order_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_place_order_forces_pending_status() {
        let orders = service().await;

        let placed = orders.place_order(request(vec![item("A")])).await.unwrap();

        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.items.len(), 1);
        assert_eq!(placed.items[0].order_id, placed.order.id);

        // Round-trips through the store
        let fetched = orders.get_order(&placed.order.id).await.unwrap();
        assert_eq!(fetched.order.status, OrderStatus::Pending);
        assert_eq!(fetched.items.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let orders = service().await;

        let err = orders.place_order(request(vec![])).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected() {
        let orders = service().await;

        let mut bad = item("A");
        bad.quantity = 0;

        let err = orders.place_order(request(vec![bad])).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_order_is_not_found() {
        let orders = service().await;

        let err = orders.get_order("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_checkout_payload_wire_format() {
        // The storefront sends camelCase; make sure a realistic payload parses
        let json = r#"{
            "customer": {
                "firstName": "Ada", "lastName": "Lovelace",
                "email": "ada@example.com", "phone": "555-0100",
                "address": "12 Analytical Way", "city": "London",
                "state": "LDN", "zipCode": "N1", "country": "UK"
            },
            "items": [{
                "productId": "p1", "name": "Trail Runner",
                "priceCents": 12999, "quantity": 2,
                "color": "Black", "size": 9.0,
                "image": "https://cdn.example.com/a.jpg"
            }],
            "totals": {
                "subtotalCents": 25998, "taxCents": 2145,
                "shippingCents": 500, "totalCents": 28643
            },
            "paymentMethod": "card",
            "orderDate": "2026-01-15T10:30:00Z"
        }"#;

        let req: PlaceOrder = serde_json::from_str(json).unwrap();
        assert_eq!(req.customer.zip_code, "N1");
        assert_eq!(req.items[0].price_cents, 12999);
        assert_eq!(req.totals.total_cents, 28643);
        assert!(req.totals.is_consistent());

        let orders = service().await;
        let placed = orders.place_order(req).await.unwrap();
        assert_eq!(placed.order.customer.city, "London");
    }
}
