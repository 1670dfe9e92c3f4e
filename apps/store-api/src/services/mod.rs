//! Service layer.
//!
//! The services own the domain invariants the HTTP handlers rely on:
//! hierarchy existence checks, uniqueness rules, delete policies, the
//! atomic order-placement flow, and credential verification. Handlers stay
//! thin adapters over these.

pub mod auth_service;
pub mod catalog_service;
pub mod order_service;
