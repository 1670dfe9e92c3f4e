//! Product handlers.

use axum::extract::{Path, State};
use axum::Json;

use velora_core::Product;

use crate::error::ApiError;
use crate::services::catalog_service::{CreateProduct, UpdateProduct};
use crate::SharedState;

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateProduct>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.create_product(req).await?))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.list_products().await?))
}

pub async fn by_main_category(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.products_by_main_category(&id).await?))
}

pub async fn by_sub_category(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.products_by_sub_category(&id).await?))
}

pub async fn by_sub_group(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.products_by_sub_group(&id).await?))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.get_product(&id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.update_product(&id, req).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_product(&id).await?;
    Ok(Json(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}
