//! Accommodation API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/accommodations | GET | public |
//! | /api/accommodations | POST | authenticated (promotes to owner) |
//! | /api/accommodations/mine | GET, PUT | owner |
//! | /api/accommodations/{id} | GET | public |
//! | /api/accommodations/{id}/rooms | GET | public |
//! | /api/accommodations/{id}/menu | GET | public |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Accommodation;

use crate::auth::{CurrentUser, RoleGate, require_role};
use crate::db::repository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/accommodations",
            get(handler::list).merge(
                post(handler::create)
                    .layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
            ),
        )
        .route("/api/accommodations/{id}", get(handler::get_by_id))
        .route("/api/accommodations/{id}/rooms", get(handler::list_rooms))
        .route("/api/accommodations/{id}/menu", get(handler::list_menu))
        .merge(
            Router::new()
                .route(
                    "/api/accommodations/mine",
                    get(handler::get_mine).put(handler::update_mine),
                )
                .route_layer(middleware::from_fn(require_role(RoleGate::Owner))),
        )
}

/// The accommodation owned by `user`, 404 when none is registered
pub(crate) async fn owned_accommodation(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<Accommodation> {
    repository::accommodation::find_by_owner(&state.pool, &user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::AccommodationNotFound,
                "You have not registered an accommodation",
            )
        })
}
