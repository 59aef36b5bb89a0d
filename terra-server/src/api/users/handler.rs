//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{RoleUpdate, User};

use crate::auth::CurrentUser;
use crate::db::repository;
use crate::security_log;
use crate::state::AppState;

/// GET /api/users/me - the caller's stored profile
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<User>> {
    let stored = repository::user::find_by_id(&state.pool, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", user.id)))?;
    Ok(ApiResponse::success(stored))
}

/// PUT /api/admin/users/{id}/role - assign a role
pub async fn set_role(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<ApiResponse<User>> {
    let updated = repository::user::set_role(&state.pool, &id, payload.role).await?;
    security_log!(
        "INFO",
        "role_changed",
        admin_id = admin.id.clone(),
        user_id = id.clone(),
        role = payload.role.as_str()
    );
    Ok(ApiResponse::success_with_message("Role updated", updated))
}
