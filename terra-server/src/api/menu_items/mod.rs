//! Menu item API (owner)
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/menu-items | POST (multipart, at most 1 image) | owner |
//! | /api/menu-items/{id}/availability | PATCH | owner |
//! | /api/menu-items/{id} | DELETE | owner |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, patch, post},
};

use crate::api::multipart::MAX_FILE_SIZE;
use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/menu-items",
            post(handler::create).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/api/menu-items/{id}/availability", patch(handler::set_availability))
        .route("/api/menu-items/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_role(RoleGate::Owner)))
}
