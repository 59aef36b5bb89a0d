//! Data models
//!
//! Shared between terra-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Row ids are `i64` (SQLite INTEGER PRIMARY KEY); user ids are the identity
//! provider's opaque strings. JSON is camelCase.

pub mod accommodation;
pub mod booking;
pub mod event;
pub mod menu_item;
pub mod room;
pub mod user;
pub mod vegan_business;
pub mod wishlist;

// Re-exports
pub use accommodation::*;
pub use booking::*;
pub use event::*;
pub use menu_item::*;
pub use room::*;
pub use user::*;
pub use vegan_business::*;
pub use wishlist::*;
