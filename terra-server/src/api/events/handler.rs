//! Event API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppResult};
use shared::models::{Event, EventCreate, EventReview, EventStatus};

use crate::auth::CurrentUser;
use crate::db::repository;
use crate::events;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewQueueQuery {
    pub status: Option<EventStatus>,
}

/// GET /api/events - approved events by start date
pub async fn list_approved(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Event>>> {
    let list = repository::event::find_approved(&state.pool).await?;
    Ok(ApiResponse::success(list))
}

/// POST /api/events - submit for review
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<EventCreate>,
) -> AppResult<(StatusCode, ApiResponse<Event>)> {
    let event = events::submit(
        &state.pool,
        state.mailer.as_ref(),
        state.config.admin_notify_email.as_deref(),
        &user.id,
        &payload,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Event submitted for review", event),
    ))
}

/// GET /api/events/mine - the caller's submissions
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Event>>> {
    let list = repository::event::find_by_submitter(&state.pool, &user.id).await?;
    Ok(ApiResponse::success(list))
}

/// GET /api/events/admin?status=pending - priority submissions first
pub async fn review_queue(
    State(state): State<AppState>,
    Query(query): Query<ReviewQueueQuery>,
) -> AppResult<ApiResponse<Vec<Event>>> {
    let list = repository::event::find_for_review(&state.pool, query.status).await?;
    Ok(ApiResponse::success(list))
}

/// PUT /api/events/admin/{id}/status - `{status, reviewNotes}`
pub async fn review(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EventReview>,
) -> AppResult<ApiResponse<Event>> {
    let event = events::review(&state.pool, state.mailer.as_ref(), &admin.id, id, &payload).await?;
    Ok(ApiResponse::success_with_message("Event reviewed", event))
}
