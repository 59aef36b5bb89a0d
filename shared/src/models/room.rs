//! Room Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum RoomType {
    Single,
    Double,
    Luxury,
    Suite,
}

/// Room entity (bookable unit of a lodging accommodation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub accommodation_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Nightly rate
    pub price_per_night: f64,
    pub description: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    /// Public URLs returned by object storage
    #[cfg_attr(feature = "db", sqlx(json))]
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: i64,
}

/// Create room payload (text fields of the multipart form)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub price_per_night: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Availability toggle payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}
