//! Event API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/events | GET | public (approved only) |
//! | /api/events | POST | authenticated, rate limited |
//! | /api/events/mine | GET | authenticated |
//! | /api/events/admin | GET | admin |
//! | /api/events/admin/{id}/status | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::rate_limit::submission_rate_limit;
use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/events",
            get(handler::list_approved).merge(
                post(handler::submit)
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        submission_rate_limit,
                    ))
                    .layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
            ),
        )
        .merge(
            Router::new()
                .route("/api/events/mine", get(handler::list_mine))
                .route_layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
        )
        .merge(
            Router::new()
                .route("/api/events/admin", get(handler::review_queue))
                .route("/api/events/admin/{id}/status", put(handler::review))
                .route_layer(middleware::from_fn(require_role(RoleGate::Admin))),
        )
}
