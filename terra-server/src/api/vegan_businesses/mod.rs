//! Vegan business directory API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/vegan-businesses | GET | public |
//! | /api/vegan-businesses | POST (multipart, at most 1 image) | authenticated |
//! | /api/vegan-businesses/{id} | DELETE | authenticated (submitter or admin) |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};

use crate::api::multipart::MAX_FILE_SIZE;
use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/vegan-businesses",
            get(handler::list).merge(
                post(handler::create)
                    .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
                    .layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
            ),
        )
        .merge(
            Router::new()
                .route("/api/vegan-businesses/{id}", delete(handler::delete))
                .route_layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
        )
}
