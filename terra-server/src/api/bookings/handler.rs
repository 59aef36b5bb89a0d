//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{AvailabilityQuery, Booking, BookingDetail, BookingRequest};

use crate::api::accommodations::owned_accommodation;
use crate::auth::CurrentUser;
use crate::booking::{self, BookingOutcome, Stay};
use crate::db::repository;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub is_available: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}

/// POST /api/bookings/check-availability - `{room, checkInDate, checkOutDate}`
pub async fn check_availability(
    State(state): State<AppState>,
    Json(query): Json<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let room = query.room.ok_or_else(|| AppError::required_field("room"))?;
    let stay = Stay::parse(query.check_in_date.as_deref(), query.check_out_date.as_deref())?;

    let is_available = booking::room_availability(&state.pool, room, &stay).await?;
    Ok(Json(AvailabilityResponse {
        success: true,
        is_available,
    }))
}

/// POST /api/bookings/book - `{room, checkInDate, checkOutDate, guests}`
pub async fn book(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    match booking::create_booking(&state.pool, &user.id, &request).await? {
        BookingOutcome::Created(booking) => Ok((
            StatusCode::CREATED,
            Json(BookingResponse {
                success: true,
                message: "Booking created successfully".to_string(),
                booking,
            }),
        )),
        BookingOutcome::Unavailable => Err(AppError::new(ErrorCode::RoomUnavailable)),
    }
}

/// GET /api/bookings/user - the caller's bookings, newest first
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<BookingDetail>>> {
    let list = repository::booking::find_by_user(&state.pool, &user.id).await?;
    Ok(ApiResponse::success(list))
}

/// GET /api/bookings/accommodation - bookings at the owner's property
pub async fn list_for_accommodation(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<BookingDetail>>> {
    let acc = owned_accommodation(&state, &user).await?;
    let list = repository::booking::find_by_accommodation(&state.pool, acc.id).await?;
    Ok(ApiResponse::success(list))
}

/// PATCH /api/bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Booking>> {
    let booking = booking::cancel_booking(&state.pool, &user, id).await?;
    Ok(ApiResponse::success_with_message("Booking cancelled", booking))
}
