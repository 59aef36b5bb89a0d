//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`users`] - current user, admin role management
//! - [`accommodations`] - registration, public listings, rooms and menu by listing
//! - [`rooms`] - owner room management (multipart)
//! - [`menu_items`] - owner menu management (multipart)
//! - [`bookings`] - availability, booking, cancellation
//! - [`wishlist`] - saved accommodations
//! - [`events`] - event submissions and admin review
//! - [`vegan_businesses`] - vegan directory

pub mod multipart;

pub mod accommodations;
pub mod bookings;
pub mod events;
pub mod health;
pub mod menu_items;
pub mod rooms;
pub mod users;
pub mod vegan_businesses;
pub mod wishlist;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::authenticate;
use crate::config::StorageBackend;
use crate::state::AppState;

/// All routes, no middleware, no state bound yet
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(accommodations::router())
        .merge(rooms::router())
        .merge(menu_items::router())
        .merge(bookings::router(state))
        .merge(wishlist::router())
        .merge(events::router(state))
        .merge(vegan_businesses::router())
}

/// Fully configured application: routes, auth, static uploads, tracing
pub fn build_app(state: AppState) -> Router {
    let mut app = build_router(&state)
        // Resolves CurrentUser before any route gate runs
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state.clone());

    if let StorageBackend::Local {
        dir,
        public_base_url,
    } = &state.config.storage
        && public_base_url.starts_with('/')
        && public_base_url.len() > 1
    {
        app = app.nest_service(public_base_url.trim_end_matches('/'), ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
