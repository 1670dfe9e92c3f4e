//! Main category handlers.

use axum::extract::{Path, State};
use axum::Json;

use velora_core::{CategoryTreeNode, MainCategory};

use crate::error::ApiError;
use crate::services::catalog_service::{CreateCategory, UpdateCategory};
use crate::SharedState;

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateCategory>,
) -> Result<Json<MainCategory>, ApiError> {
    Ok(Json(state.catalog.create_category(req).await?))
}

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MainCategory>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

pub async fn tree(
    State(state): State<SharedState>,
) -> Result<Json<Vec<CategoryTreeNode>>, ApiError> {
    Ok(Json(state.catalog.full_tree().await?))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MainCategory>, ApiError> {
    Ok(Json(state.catalog.get_category(&id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCategory>,
) -> Result<Json<MainCategory>, ApiError> {
    Ok(Json(state.catalog.update_category(&id, req).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_category(&id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Main category {} deleted successfully", id)
    })))
}
