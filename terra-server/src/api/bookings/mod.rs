//! Booking API
//!
//! | Path | Method | Gate |
//! |------|--------|------|
//! | /api/bookings/check-availability | POST | public |
//! | /api/bookings/book | POST | authenticated, rate limited |
//! | /api/bookings/user | GET | authenticated |
//! | /api/bookings/{id}/cancel | PATCH | authenticated (guest or host) |
//! | /api/bookings/accommodation | GET | owner |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::rate_limit::booking_rate_limit;
use crate::auth::{RoleGate, require_role};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/bookings/check-availability",
            post(handler::check_availability),
        )
        .merge(
            Router::new()
                .route(
                    "/api/bookings/book",
                    post(handler::book).layer(middleware::from_fn_with_state(
                        state.clone(),
                        booking_rate_limit,
                    )),
                )
                .route("/api/bookings/user", get(handler::list_mine))
                .route("/api/bookings/{id}/cancel", patch(handler::cancel))
                .route_layer(middleware::from_fn(require_role(RoleGate::Authenticated))),
        )
        .merge(
            Router::new()
                .route("/api/bookings/accommodation", get(handler::list_for_accommodation))
                .route_layer(middleware::from_fn(require_role(RoleGate::Owner))),
        )
}
