//! Subcategory handlers.

use axum::extract::{Path, State};
use axum::Json;

use velora_core::SubCategory;

use crate::error::ApiError;
use crate::services::catalog_service::{CreateSubCategory, UpdateSubCategory};
use crate::SharedState;

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateSubCategory>,
) -> Result<Json<SubCategory>, ApiError> {
    Ok(Json(state.catalog.create_sub_category(req).await?))
}

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SubCategory>>, ApiError> {
    Ok(Json(state.catalog.list_sub_categories().await?))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SubCategory>, ApiError> {
    Ok(Json(state.catalog.get_sub_category(&id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubCategory>,
) -> Result<Json<SubCategory>, ApiError> {
    Ok(Json(state.catalog.update_sub_category(&id, req).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_sub_category(&id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Subcategory {} deleted successfully", id)
    })))
}
