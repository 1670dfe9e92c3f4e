//! # Domain Types
//!
//! Core domain types used throughout Velora.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (4 levels)                    Orders                           │
//! │  ┌────────────────┐                    ┌────────────────┐               │
//! │  │  MainCategory  │ 1                  │     Order      │ 1             │
//! │  └───────┬────────┘                    └───────┬────────┘               │
//! │          │ N                                   │ N                      │
//! │  ┌───────▼────────┐                    ┌───────▼────────┐               │
//! │  │  SubCategory   │ 1                  │   OrderItem    │               │
//! │  └───────┬────────┘                    │  (snapshot of  │               │
//! │          │ N                           │   a product)   │               │
//! │  ┌───────▼────────┐                    └────────────────┘               │
//! │  │    SubGroup    │ 1                                                   │
//! │  └───────┬────────┘                    ┌────────────────┐               │
//! │          │ N                           │   AdminUser    │               │
//! │  ┌───────▼────────┐                    │ (hashed creds) │               │
//! │  │    Product     │                    └────────────────┘               │
//! │  └────────────────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product carries all three hierarchy references independently; the store
//! never verifies that they form a connected path through the tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog Hierarchy
// =============================================================================

/// Top level of the catalog hierarchy.
///
/// Names are unique across main categories (and only at this level).
/// Deleting a main category cascades to all descendant subcategories and
/// subgroups.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MainCategory {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique among main categories.
    pub name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Second level of the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SubCategory {
    pub id: String,

    pub name: String,

    /// Owning main category. Validated for existence at write time.
    pub main_category_id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Third level of the catalog hierarchy.
///
/// Products reference subgroups, but the subgroup→product relationship has a
/// configurable delete policy rather than an unconditional cascade.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SubGroup {
    pub id: String,

    pub name: String,

    /// Owning subcategory. Validated for existence at write time.
    pub sub_category_id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title, globally unique across all products.
    pub title: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Hierarchy references. Each is validated independently at write time;
    /// the three are NOT required to form a connected path through the tree.
    pub main_category_id: String,
    pub sub_category_id: String,
    pub sub_group_id: String,

    /// Available colors, e.g. `["Red", "Blue"]`.
    pub colors: Vec<String>,

    /// Available sizes, e.g. `[6.0, 6.5, 7.0]`.
    pub sizes: Vec<f64>,

    /// Image/video URLs in display order.
    pub assets: Vec<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order.
///
/// The store does not constrain transitions: any status may replace any
/// other, and updates are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been placed but not yet handled.
    Pending,
    /// Order is being prepared.
    Processing,
    /// Order has left the warehouse.
    Shipped,
    /// Order reached the customer.
    Delivered,
    /// Order was cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Lowercase wire/storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Contact/shipping record captured with an order.
///
/// Serialized in camelCase to match the checkout frontend, and stored
/// verbatim as a JSON column on the order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

// =============================================================================
// Order Totals
// =============================================================================

/// Monetary breakdown of an order, in cents.
///
/// camelCase on the wire: it rides inside the checkout payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// Checks that total = subtotal + tax + shipping without overflow.
    ///
    /// The store persists whatever the caller supplies; this helper is how a
    /// caller honors that contract.
    pub fn is_consistent(&self) -> bool {
        Money::from_cents(self.subtotal_cents)
            .checked_add(Money::from_cents(self.tax_cents))
            .and_then(|m| m.checked_add(Money::from_cents(self.shipping_cents)))
            .map(|m| m.cents() == self.total_cents)
            .unwrap_or(false)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Customer record captured at checkout.
    pub customer: Customer,

    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,

    /// Free-form payment method label from the checkout (e.g. "card").
    pub payment_method: String,

    /// Order date supplied by the checkout.
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,

    /// Always starts as [`OrderStatus::Pending`] regardless of caller input.
    pub status: OrderStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the monetary breakdown of this order.
    #[inline]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal_cents: self.subtotal_cents,
            tax_cents: self.tax_cents,
            shipping_cents: self.shipping_cents,
            total_cents: self.total_cents,
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at order time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,

    pub order_id: String,

    /// The product this item was created from. Deliberately NOT checked
    /// against the products table: the snapshot must outlive the product.
    pub product_id: String,

    /// Product title at order time (frozen).
    pub name: String,

    /// Unit price in cents at order time (frozen).
    pub price_cents: i64,

    /// Quantity ordered.
    pub quantity: i64,

    /// Chosen color at order time (frozen).
    pub color: String,

    /// Chosen size at order time (frozen).
    pub size: f64,

    /// Image URL at order time (frozen).
    pub image: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Line total (unit price × quantity), saturating on overflow.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_cents.saturating_mul(self.quantity))
    }
}

// =============================================================================
// Admin User
// =============================================================================

/// An administrator account.
///
/// Only the argon2 hash of the password is ever held; there is no way to
/// recover the plaintext. Not a wire type - the API exposes id/email only.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Catalog Tree
// =============================================================================

/// Eagerly materialized catalog tree node: a main category with its
/// subcategories and their subgroups. No product data is included.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryTreeNode {
    pub id: String,
    pub name: String,
    pub sub_categories: Vec<SubCategoryTreeNode>,
}

/// A subcategory with its subgroups, as nested inside [`CategoryTreeNode`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubCategoryTreeNode {
    pub id: String,
    pub name: String,
    pub sub_groups: Vec<SubGroupTreeNode>,
}

/// A leaf subgroup inside the catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubGroupTreeNode {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Subgroup Delete Policy
// =============================================================================

/// What happens to products that reference a subgroup being deleted.
///
/// The subgroup→product edge is the one hierarchy relationship without an
/// unconditional cascade, so the policy is explicit and configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubGroupDeletePolicy {
    /// Delete the subgroup only; referencing products remain, pointing at a
    /// subgroup id that no longer resolves.
    Detach,
    /// Refuse to delete a subgroup while products reference it.
    Restrict,
    /// Delete referencing products together with the subgroup.
    Cascade,
}

impl Default for SubGroupDeletePolicy {
    fn default() -> Self {
        SubGroupDeletePolicy::Detach
    }
}

impl std::str::FromStr for SubGroupDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "detach" => Ok(SubGroupDeletePolicy::Detach),
            "restrict" => Ok(SubGroupDeletePolicy::Restrict),
            "cascade" => Ok(SubGroupDeletePolicy::Cascade),
            other => Err(format!("unknown subgroup delete policy: {}", other)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");

        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_customer_serializes_camel_case() {
        let customer = Customer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "N1".to_string(),
            country: "UK".to_string(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["zipCode"], "N1");
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn test_totals_consistency() {
        let good = OrderTotals {
            subtotal_cents: 10_000,
            tax_cents: 825,
            shipping_cents: 500,
            total_cents: 11_325,
        };
        assert!(good.is_consistent());

        let bad = OrderTotals {
            total_cents: 11_326,
            ..good
        };
        assert!(!bad.is_consistent());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            id: "i1".to_string(),
            order_id: "o1".to_string(),
            product_id: "p1".to_string(),
            name: "Runner Mk II".to_string(),
            price_cents: 12_999,
            quantity: 3,
            color: "Black".to_string(),
            size: 9.5,
            image: "https://cdn.example.com/runner.jpg".to_string(),
            created_at: chrono::Utc::now(),
        };
        assert_eq!(item.line_total().cents(), 38_997);
    }

    #[test]
    fn test_delete_policy_parse() {
        use std::str::FromStr;

        assert_eq!(
            SubGroupDeletePolicy::from_str("Detach").unwrap(),
            SubGroupDeletePolicy::Detach
        );
        assert_eq!(
            SubGroupDeletePolicy::from_str("cascade").unwrap(),
            SubGroupDeletePolicy::Cascade
        );
        assert!(SubGroupDeletePolicy::from_str("nuke").is_err());
    }
}
