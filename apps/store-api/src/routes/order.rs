//! Order handlers.
//!
//! Placement and reads are public (the storefront checkout is
//! unauthenticated); the status overwrite and deletion are admin mutations.

use axum::extract::{Path, Query, State};
use axum::Json;

use velora_core::Order;

use crate::error::ApiError;
use crate::services::order_service::{OrderDetail, OrderFilters, PlaceOrder, UpdateOrderStatus};
use crate::SharedState;

pub async fn place(
    State(state): State<SharedState>,
    Json(req): Json<PlaceOrder>,
) -> Result<Json<OrderDetail>, ApiError> {
    Ok(Json(state.orders.place_order(req).await?))
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_orders(filters).await?))
}

/// Admin listing; same filters as the public one.
pub async fn admin_list(
    State(state): State<SharedState>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_orders(filters).await?))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetail>, ApiError> {
    Ok(Json(state.orders.get_order(&id).await?))
}

pub async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatus>,
) -> Result<Json<OrderDetail>, ApiError> {
    Ok(Json(state.orders.update_status(&id, req).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.orders.delete_order(&id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Order {} deleted successfully", id)
    })))
}
