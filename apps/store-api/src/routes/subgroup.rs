//! Subgroup handlers.

use axum::extract::{Path, State};
use axum::Json;

use velora_core::SubGroup;

use crate::error::ApiError;
use crate::services::catalog_service::{CreateSubGroup, SubGroupDeleted, UpdateSubGroup};
use crate::SharedState;

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateSubGroup>,
) -> Result<Json<SubGroup>, ApiError> {
    Ok(Json(state.catalog.create_sub_group(req).await?))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<SubGroup>>, ApiError> {
    Ok(Json(state.catalog.list_sub_groups().await?))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SubGroup>, ApiError> {
    Ok(Json(state.catalog.get_sub_group(&id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubGroup>,
) -> Result<Json<SubGroup>, ApiError> {
    Ok(Json(state.catalog.update_sub_group(&id, req).await?))
}

/// Deletes a subgroup under the configured policy; the response reports how
/// many products went with it (always 0 outside cascade mode).
pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SubGroupDeleted>, ApiError> {
    Ok(Json(state.catalog.delete_sub_group(&id).await?))
}
