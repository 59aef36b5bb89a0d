//! Room API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Accommodation, AvailabilityUpdate, Room, RoomCreate};

use super::MAX_ROOM_IMAGES;
use crate::api::accommodations::owned_accommodation;
use crate::api::multipart::{MultipartForm, store_all};
use crate::auth::CurrentUser;
use crate::db::repository;
use crate::state::AppState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, normalize_tags, optional_text, require_price, require_text,
};

const IMAGE_FOLDER: &str = "rooms";

/// POST /api/rooms - multipart: name, type, pricePerNight, description, amenities, images
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, ApiResponse<Room>)> {
    let acc = owned_accommodation(&state, &user).await?;
    if !acc.property_type.is_lodging() {
        return Err(AppError::with_message(
            ErrorCode::PropertyTypeMismatch,
            "Rooms can only be added to lodging properties",
        ));
    }

    let form = MultipartForm::read(multipart, "images", MAX_ROOM_IMAGES).await?;
    let payload = RoomCreate {
        name: form.require("name")?.to_string(),
        room_type: form
            .variant("type")?
            .ok_or_else(|| AppError::required_field("type"))?,
        price_per_night: form
            .parse::<f64>("pricePerNight")?
            .ok_or_else(|| AppError::required_field("pricePerNight"))?,
        description: form.text("description").map(String::from),
        amenities: normalize_tags(form.list("amenities")?),
    };
    require_text(&payload.name, "name", MAX_NAME_LEN)?;
    require_price(payload.price_per_night, "pricePerNight")?;
    optional_text(payload.description.as_deref(), "description", MAX_TEXT_LEN)?;

    let images = store_all(state.storage.as_ref(), IMAGE_FOLDER, &form.files).await?;
    let room = repository::room::create(&state.pool, acc.id, &payload, &images).await?;

    tracing::info!(
        room_id = room.id,
        accommodation_id = acc.id,
        images = images.len(),
        "Room created"
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Room created", room),
    ))
}

/// GET /api/rooms/mine - every room of the owner's property, bookable or not
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Room>>> {
    let acc = owned_accommodation(&state, &user).await?;
    let rooms = repository::room::find_by_accommodation(&state.pool, acc.id, false).await?;
    Ok(ApiResponse::success(rooms))
}

/// PATCH /api/rooms/{id}/availability
pub async fn set_availability(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<ApiResponse<Room>> {
    let acc = owned_accommodation(&state, &user).await?;
    own_room(&state, &acc, id).await?;

    let room = repository::room::set_availability(&state.pool, id, payload.is_available).await?;
    tracing::info!(room_id = id, is_available = payload.is_available, "Room availability changed");
    Ok(ApiResponse::success(room))
}

/// DELETE /api/rooms/{id} - refused while bookings reference the room
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let acc = owned_accommodation(&state, &user).await?;
    own_room(&state, &acc, id).await?;

    repository::room::delete(&state.pool, id).await?;
    tracing::info!(room_id = id, accommodation_id = acc.id, "Room deleted");
    Ok(ApiResponse::ok())
}

/// Rooms of other properties are reported as missing
async fn own_room(state: &AppState, acc: &Accommodation, id: i64) -> AppResult<Room> {
    repository::room::find_by_id(&state.pool, id)
        .await?
        .filter(|room| room.accommodation_id == acc.id)
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound).with_detail("id", id))
}
