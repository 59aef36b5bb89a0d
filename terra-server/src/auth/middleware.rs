//! Authentication middleware
//!
//! [`authenticate`] runs on every request. It resolves a bearer token into a
//! [`CurrentUser`] when one is present and lets anonymous requests through;
//! [`require_role`] layers enforce access per route group.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use super::{CurrentUser, IdentityError, IdentityVerifier, RoleGate};
use crate::db::repository;
use crate::security_log;
use crate::state::AppState;

/// Resolve the caller from `Authorization: Bearer <token>`.
///
/// | Header | Result |
/// |--------|--------|
/// | absent | continue anonymously |
/// | malformed or invalid token | 401 |
/// | valid token | user provisioned, [`CurrentUser`] inserted into extensions |
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map(str::to_owned)
            .map_err(|_| AppError::invalid_token("Invalid authorization header"))?,
        None => return Ok(next.run(req).await),
    };

    let token = IdentityVerifier::extract_from_header(&header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = match state.identity.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            return Err(match e {
                IdentityError::Expired => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let force_admin = state.config.admin_user_ids.iter().any(|id| id == &claims.sub);
    let user = repository::user::provision(
        &state.pool,
        &claims.sub,
        claims.email.as_deref(),
        claims.name.as_deref(),
        force_admin,
    )
    .await?;

    req.extensions_mut().insert(CurrentUser::from(user));
    Ok(next.run(req).await)
}

/// Role gate for a route group
///
/// ```ignore
/// Router::new()
///     .route("/api/rooms/mine", get(handler::mine))
///     .layer(middleware::from_fn(require_role(RoleGate::Owner)));
/// ```
pub fn require_role(
    gate: RoleGate,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let Some(user) = req.extensions().get::<CurrentUser>() else {
                security_log!("WARN", "auth_missing", uri = req.uri().to_string(), gate = gate.as_str());
                return Err(AppError::not_authenticated());
            };

            if let Err(e) = gate.check(user.role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    role = user.role.as_str(),
                    gate = gate.as_str()
                );
                return Err(e);
            }

            Ok(next.run(req).await)
        })
    }
}
