//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking status
///
/// Only `pending` and `confirmed` bookings block a room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    #[default]
    PayAtProperty,
    Card,
    Eft,
}

/// Booking entity
///
/// `check_in`/`check_out` are UTC epoch millis; the stay is the half-open
/// interval `[check_in, check_out)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub user_id: String,
    pub room_id: i64,
    pub accommodation_id: i64,
    pub check_in: i64,
    pub check_out: i64,
    pub guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub created_at: i64,
}

/// Booking joined with the names a guest or owner wants to see
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub booking: Booking,
    pub room_name: String,
    pub accommodation_name: String,
}

/// Body of `POST /api/bookings/check-availability`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub room: Option<i64>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

/// Body of `POST /api/bookings/book`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room: Option<i64>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub guests: Option<i32>,
    pub payment_method: Option<PaymentMethod>,
}
