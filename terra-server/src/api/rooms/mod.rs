//! Room API (owner)
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/rooms | POST (multipart, up to 6 images) | owner |
//! | /api/rooms/mine | GET | owner |
//! | /api/rooms/{id}/availability | PATCH | owner |
//! | /api/rooms/{id} | DELETE | owner |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
};

use crate::api::multipart::MAX_FILE_SIZE;
use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

/// Images accepted per room
pub const MAX_ROOM_IMAGES: usize = 6;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/rooms",
            post(handler::create)
                .layer(DefaultBodyLimit::max(MAX_ROOM_IMAGES * MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/api/rooms/mine", get(handler::list_mine))
        .route("/api/rooms/{id}/availability", patch(handler::set_availability))
        .route("/api/rooms/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_role(RoleGate::Owner)))
}
