//! # velora-core: Pure Business Logic for Velora
//!
//! This crate is the **heart** of the Velora catalog/order backend. It
//! contains all domain types and business rules as pure code with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Velora Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / Admin Frontend                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (JSON)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  store-api (axum handlers)                      │   │
//! │  │    catalog routes, order routes, admin routes                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ velora-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │ password  │  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │  │  argon2   │  │   │
//! │  │   │   Order   │  │  (cents)  │  │  checks   │  │  hashing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  velora-db (Storage Layer)                      │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (catalog hierarchy, Product, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`password`] - Password hashing and verification (argon2)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic or uses only local
//!    entropy (salt generation) - never I/O
//! 2. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod password;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use velora_core::Money` instead of
// `use velora_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a category, subcategory, or subgroup name.
///
/// Mirrors the VARCHAR(50) columns of the catalog tables.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length of a product title.
///
/// Mirrors the VARCHAR(100) column of the products table.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum number of line items accepted in a single order.
///
/// Keeps a single placement transaction bounded.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Minimum length of an admin password.
pub const MIN_PASSWORD_LEN: usize = 8;
