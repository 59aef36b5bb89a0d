//! Authentication and authorization
//!
//! - [`IdentityVerifier`] - identity provider token verification
//! - [`CurrentUser`] - the resolved caller
//! - [`authenticate`] - global middleware, anonymous requests pass through
//! - [`require_role`] - per route group [`RoleGate`] enforcement
//! - [`rate_limit`] - per-IP limits on public write routes

pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod permissions;
pub mod rate_limit;

pub use extractor::CurrentUser;
pub use identity::{Claims, IdentityError, IdentityVerifier};
pub use middleware::{authenticate, require_role};
pub use permissions::RoleGate;
pub use rate_limit::RateLimiter;
