//! Wishlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Accommodation, WishlistAdd, WishlistEntry};

use crate::auth::CurrentUser;
use crate::db::repository;
use crate::state::AppState;

/// GET /api/wishlist - saved accommodations, most recent first
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Accommodation>>> {
    let list = repository::wishlist::list_accommodations(&state.pool, &user.id).await?;
    Ok(ApiResponse::success(list))
}

/// POST /api/wishlist - `{accommodationId}`
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<WishlistAdd>,
) -> AppResult<(StatusCode, ApiResponse<WishlistEntry>)> {
    repository::accommodation::find_by_id(&state.pool, payload.accommodation_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::AccommodationNotFound).with_detail("id", payload.accommodation_id)
        })?;

    let entry = repository::wishlist::add(&state.pool, &user.id, payload.accommodation_id).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Added to wishlist", entry),
    ))
}

/// DELETE /api/wishlist/{accommodationId}
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(accommodation_id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    repository::wishlist::remove(&state.pool, &user.id, accommodation_id).await?;
    Ok(ApiResponse::ok())
}
