//! Shared types for TerraBook
//!
//! Domain models, the unified error system and the API response envelope
//! used by terra-server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
