//! Admin account handlers.
//!
//! `login` is the only unauthenticated `/admin` route; creating further
//! admin accounts requires a valid bearer token.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::services::auth_service::{AdminRead, CreateAdmin, LoginRequest, LoginResponse};
use crate::SharedState;

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(state.auth.login(req).await?))
}

pub async fn create_admin(
    State(state): State<SharedState>,
    Json(req): Json<CreateAdmin>,
) -> Result<Json<AdminRead>, ApiError> {
    Ok(Json(state.auth.create_admin(req).await?))
}
