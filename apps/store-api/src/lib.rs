//! # Velora Store API
//!
//! HTTP server for the Velora catalog/order backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store API Services                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │ CatalogService │  │  OrderService  │  │  AuthService               ││
//! │  │                │  │                │  │                            ││
//! │  │ • hierarchy    │  │ • place_order  │  │ • login (JWT issue)        ││
//! │  │   CRUD + tree  │  │   (atomic)     │  │ • create_admin (argon2)    ││
//! │  │ • product CRUD │  │ • filters      │  │                            ││
//! │  │ • delete       │  │ • status       │  │  require_admin middleware  ││
//! │  │   policies     │  │   overwrite    │  │  gates every /admin route  ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  Route handler → (bearer gate on /admin/*) → service → repository      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - server port (default: 8080)
//! - `DATABASE_PATH` - SQLite file path (default: ./velora.db)
//! - `JWT_SECRET` - secret for token signing
//! - `TOKEN_LIFETIME_SECS` - bearer token lifetime (default: 1800 = 30 min)
//! - `SUBGROUP_DELETE_POLICY` - detach | restrict | cascade (default: detach)
//! - `CORS_ALLOW_ORIGIN` - allowed origin (default: any, for development)

use std::sync::Arc;

use velora_db::Database;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;

use auth::TokenManager;
use services::auth_service::AuthService;
use services::catalog_service::CatalogService;
use services::order_service::OrderService;

/// Shared application state.
pub struct AppState {
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub auth: AuthService,
    pub tokens: TokenManager,
    pub config: ApiConfig,
}

/// State handle passed to every handler.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wires the services over one injected database handle.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let tokens = TokenManager::new(config.jwt_secret.clone(), config.token_lifetime_secs);

        AppState {
            catalog: CatalogService::new(db.clone(), config.subgroup_delete_policy),
            orders: OrderService::new(db.clone()),
            auth: AuthService::new(db, tokens.clone()),
            tokens,
            config,
        }
    }
}
