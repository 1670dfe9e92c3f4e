//! # velora-db: Database Layer for Velora
//!
//! This crate provides database access for the Velora catalog/order backend.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Velora Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (create_product, place_order, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     velora-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (per entity)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ CategoryRepo  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ ProductRepo   │    │              │  │   │
//! │  │   │ Management    │    │ OrderRepo ... │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (one per aggregate)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use velora_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/velora.db")).await?;
//! let tree_roots = db.categories().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::admin::AdminRepository;
pub use repository::category::CategoryRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::subcategory::SubCategoryRepository;
pub use repository::subgroup::SubGroupRepository;
