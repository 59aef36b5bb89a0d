//! Accommodation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    Accommodation, AccommodationCreate, AccommodationFilter, AccommodationUpdate, MenuItem, Room,
};

use super::owned_accommodation;
use crate::auth::CurrentUser;
use crate::db::repository;
use crate::state::AppState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, normalize_tags, optional_text, require_email, require_text,
};

/// GET /api/accommodations - public listing, filter by propertyType and city
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AccommodationFilter>,
) -> AppResult<ApiResponse<Vec<Accommodation>>> {
    let list = repository::accommodation::list(&state.pool, &filter).await?;
    Ok(ApiResponse::success(list))
}

/// GET /api/accommodations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Accommodation>> {
    let acc = find(&state, id).await?;
    Ok(ApiResponse::success(acc))
}

/// GET /api/accommodations/{id}/rooms - bookable rooms only
pub async fn list_rooms(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<Room>>> {
    find(&state, id).await?;
    let rooms = repository::room::find_by_accommodation(&state.pool, id, true).await?;
    Ok(ApiResponse::success(rooms))
}

/// GET /api/accommodations/{id}/menu - available items only
pub async fn list_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<MenuItem>>> {
    find(&state, id).await?;
    let items = repository::menu_item::find_by_accommodation(&state.pool, id, true).await?;
    Ok(ApiResponse::success(items))
}

/// POST /api/accommodations - register the caller's property
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(mut payload): Json<AccommodationCreate>,
) -> AppResult<(StatusCode, ApiResponse<Accommodation>)> {
    require_text(&payload.name, "name", MAX_NAME_LEN)?;
    require_email(&payload.email, "email")?;
    optional_text(payload.description.as_deref(), "description", MAX_TEXT_LEN)?;
    optional_text(payload.phone.as_deref(), "phone", MAX_NAME_LEN)?;
    optional_text(payload.address.as_deref(), "address", MAX_NAME_LEN)?;
    optional_text(payload.city.as_deref(), "city", MAX_NAME_LEN)?;
    optional_text(payload.province.as_deref(), "province", MAX_NAME_LEN)?;
    if !payload.accepts_terms {
        return Err(AppError::validation("The terms must be accepted to register")
            .with_detail("field", "acceptsTerms"));
    }
    payload.name = payload.name.trim().to_string();
    payload.amenities = normalize_tags(payload.amenities);
    payload.certifications = normalize_tags(payload.certifications);

    let acc = repository::accommodation::create(&state.pool, &user.id, &payload).await?;
    tracing::info!(
        accommodation_id = acc.id,
        owner_id = %user.id,
        property_type = ?acc.property_type,
        "Accommodation registered"
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Accommodation registered", acc),
    ))
}

/// GET /api/accommodations/mine
pub async fn get_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Accommodation>> {
    let acc = owned_accommodation(&state, &user).await?;
    Ok(ApiResponse::success(acc))
}

/// PUT /api/accommodations/mine - partial update, property type is fixed
pub async fn update_mine(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(mut payload): Json<AccommodationUpdate>,
) -> AppResult<ApiResponse<Accommodation>> {
    let acc = owned_accommodation(&state, &user).await?;

    if let Some(name) = &payload.name {
        require_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        require_email(email, "email")?;
    }
    optional_text(payload.description.as_deref(), "description", MAX_TEXT_LEN)?;
    optional_text(payload.phone.as_deref(), "phone", MAX_NAME_LEN)?;
    optional_text(payload.address.as_deref(), "address", MAX_NAME_LEN)?;
    optional_text(payload.city.as_deref(), "city", MAX_NAME_LEN)?;
    optional_text(payload.province.as_deref(), "province", MAX_NAME_LEN)?;
    payload.amenities = payload.amenities.map(normalize_tags);
    payload.certifications = payload.certifications.map(normalize_tags);

    let updated = repository::accommodation::update(&state.pool, acc.id, &payload).await?;
    tracing::info!(accommodation_id = acc.id, "Accommodation updated");
    Ok(ApiResponse::success_with_message("Accommodation updated", updated))
}

async fn find(state: &AppState, id: i64) -> AppResult<Accommodation> {
    repository::accommodation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccommodationNotFound).with_detail("id", id))
}
