//! Per-IP rate limiting for write-heavy public routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::security_log;
use crate::state::AppState;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(
        &self,
        route: &'static str,
        ip: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> bool {
        let mut map = self.inner.lock().await;
        let route_map = map.entry(route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start).as_secs() >= window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }
        map.retain(|_, route_map| !route_map.is_empty());
    }
}

/// Client IP for rate limiting.
///
/// `X-Forwarded-For` is client-controlled, so it is read only when the
/// server sits behind a proxy that sets it (`trust_proxy_headers`).
/// Otherwise the peer address is used.
fn extract_ip(request: &Request, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers
        && let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &AppState,
    route: &'static str,
    max_requests: u32,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = extract_ip(&request, state.config.trust_proxy_headers);
    if !state.rate_limiter.check(route, &ip, max_requests, 60).await {
        security_log!("WARN", "rate_limited", route = route, ip = ip);
        return Err(AppError::too_many_requests());
    }
    Ok(next.run(request).await)
}

/// Booking creation: 10 requests/minute per IP
pub async fn booking_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limit(&state, "booking", 10, request, next).await
}

/// Event submission: 5 requests/minute per IP
pub async fn submission_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limit(&state, "submission", 5, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn window_limits_per_ip_and_route() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.check("booking", "1.2.3.4", 3, 60).await);
        }
        assert!(!limiter.check("booking", "1.2.3.4", 3, 60).await);
        assert!(limiter.check("booking", "5.6.7.8", 3, 60).await);
        assert!(limiter.check("submission", "1.2.3.4", 3, 60).await);
    }

    #[tokio::test]
    async fn cleanup_keeps_fresh_entries() {
        let limiter = RateLimiter::new();
        limiter.check("booking", "1.2.3.4", 1, 60).await;
        limiter.cleanup().await;
        assert!(!limiter.check("booking", "1.2.3.4", 1, 60).await);
    }

    fn request(forwarded: Option<&str>, peer: Option<[u8; 4]>) -> Request {
        let mut builder = Request::builder();
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut req = builder.body(axum::body::Body::empty()).unwrap();
        if let Some(ip) = peer {
            req.extensions_mut().insert(axum::extract::ConnectInfo(
                std::net::SocketAddr::from((ip, 40_000)),
            ));
        }
        req
    }

    #[test]
    fn forwarded_header_used_behind_proxy() {
        let req = request(Some("9.9.9.9, 10.0.0.1"), Some([10, 0, 0, 1]));
        assert_eq!(extract_ip(&req, true), "9.9.9.9");

        let req = request(None, None);
        assert_eq!(extract_ip(&req, true), "unknown");
    }

    #[test]
    fn forwarded_header_ignored_without_proxy() {
        // Rotating the header must not give a client a fresh window
        let first = request(Some("1.1.1.1"), Some([198, 51, 100, 4]));
        let second = request(Some("2.2.2.2"), Some([198, 51, 100, 4]));
        assert_eq!(extract_ip(&first, false), "198.51.100.4");
        assert_eq!(extract_ip(&second, false), "198.51.100.4");
    }
}
