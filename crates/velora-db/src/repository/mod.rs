//! # Repository Module
//!
//! Database repository implementations for Velora.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service                                                               │
//! │       │                                                                 │
//! │       │  db.products().get_by_title("Trail Runner")                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── get_by_title(&self, title)                                        │
//! │  ├── insert(&self, product)                                            │
//! │  └── update(&self, product)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Repositories hold no invariant logic: existence checks, uniqueness    │
//! │  and delete policies live in the services. The one exception is        │
//! │  atomicity - multi-row writes (order placement, subgroup cascade)      │
//! │  run inside a single repository-owned transaction.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Main category CRUD
//! - [`subcategory::SubCategoryRepository`] - Subcategory CRUD
//! - [`subgroup::SubGroupRepository`] - Subgroup CRUD (+ product cascade)
//! - [`product::ProductRepository`] - Product CRUD and browse queries
//! - [`order::OrderRepository`] - Atomic order placement, filters, status
//! - [`admin::AdminRepository`] - Admin account storage

use uuid::Uuid;

pub mod admin;
pub mod category;
pub mod order;
pub mod product;
pub mod subcategory;
pub mod subgroup;

/// Generates a new entity ID (UUID v4 string).
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_id();
/// let category = MainCategory { id, ... };
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
