//! User API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/users/me | GET | authenticated |
//! | /api/admin/users/{id}/role | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(
            Router::new()
                .route("/api/users/me", get(handler::me))
                .route_layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
        )
        .merge(
            Router::new()
                .route("/api/admin/users/{id}/role", put(handler::set_role))
                .route_layer(middleware::from_fn(require_role(RoleGate::Admin))),
        )
}
