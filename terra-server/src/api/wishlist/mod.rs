//! Wishlist API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/wishlist | GET, POST | authenticated |
//! | /api/wishlist/{accommodationId} | DELETE | authenticated |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wishlist", get(handler::list).post(handler::add))
        .route("/api/wishlist/{accommodation_id}", delete(handler::remove))
        .route_layer(middleware::from_fn(require_role(RoleGate::Authenticated)))
}
