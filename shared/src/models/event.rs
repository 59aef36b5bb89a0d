//! Event Model

use serde::{Deserialize, Serialize};

/// Review state of an event submission
///
/// `pending -> approved | rejected`; both targets are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        }
    }

    /// Whether a review may move an event into this status
    pub fn is_review_target(&self) -> bool {
        matches!(self, EventStatus::Approved | EventStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub submitted_by: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: i64,
    pub end_at: Option<i64>,
    pub contact_email: String,
    pub status: EventStatus,
    /// Keyword classification, fixed at submission
    pub is_priority: bool,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

/// Submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `YYYY-MM-DD` or RFC 3339
    pub start_date: String,
    pub end_date: Option<String>,
    pub contact_email: String,
}

/// Admin review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReview {
    pub status: EventStatus,
    pub review_notes: Option<String>,
}
