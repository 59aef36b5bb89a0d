//! Event submissions
//!
//! `pending -> approved | rejected`. Submitting notifies the admin inbox,
//! reviewing notifies the submitter; both emails are best-effort and never
//! undo the stored state.

pub mod priority;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Event, EventCreate, EventReview, EventStatus};
use shared::util::{format_date, parse_timestamp};
use sqlx::SqlitePool;

use crate::db::repository::{self, event::NewEvent};
use crate::services::Mailer;
use crate::services::email::send_best_effort;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, require_email, require_text};

pub use priority::is_priority;

/// Validate, classify and store a submission
pub async fn submit(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    admin_email: Option<&str>,
    user_id: &str,
    data: &EventCreate,
) -> AppResult<Event> {
    require_text(&data.title, "title", MAX_NAME_LEN)?;
    require_text(&data.description, "description", MAX_TEXT_LEN)?;
    require_text(&data.location, "location", MAX_NAME_LEN)?;
    require_email(&data.contact_email, "contactEmail")?;

    let start_at = parse_date(&data.start_date, "startDate")?;
    let end_at = match data.end_date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => Some(parse_date(raw, "endDate")?),
        None => None,
    };
    if end_at.is_some_and(|end| end < start_at) {
        return Err(AppError::validation("endDate must not be before startDate")
            .with_detail("field", "endDate"));
    }

    let is_priority = is_priority(&data.title, &data.description);
    let event = repository::event::create(
        pool,
        &NewEvent {
            submitted_by: user_id,
            title: data.title.trim(),
            description: data.description.trim(),
            location: data.location.trim(),
            start_at,
            end_at,
            contact_email: data.contact_email.trim(),
            is_priority,
        },
    )
    .await?;

    tracing::info!(event_id = event.id, user_id, is_priority, "Event submitted");

    if let Some(to) = admin_email {
        let subject = if event.is_priority {
            format!("[Priority] New event submission: {}", event.title)
        } else {
            format!("New event submission: {}", event.title)
        };
        let body = format!(
            "{}\n{} on {}\n\nContact: {}\n\n{}",
            event.title,
            event.location,
            format_date(event.start_at),
            event.contact_email,
            event.description
        );
        send_best_effort(mailer, to, &subject, &body).await;
    }

    Ok(event)
}

/// Approve or reject a pending event (admin)
pub async fn review(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    reviewer: &str,
    event_id: i64,
    data: &EventReview,
) -> AppResult<Event> {
    if !data.status.is_review_target() {
        return Err(AppError::with_message(
            ErrorCode::InvalidReviewStatus,
            "status must be approved or rejected",
        )
        .with_detail("field", "status"));
    }
    let notes = data
        .review_notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let event = repository::event::review(pool, event_id, data.status, notes, reviewer).await?;
    tracing::info!(event_id, reviewer, status = event.status.as_str(), "Event reviewed");

    let (subject, verdict) = match event.status {
        EventStatus::Approved => (
            format!("Your event \"{}\" was approved", event.title),
            "has been approved and is now listed on TerraBook",
        ),
        EventStatus::Rejected => (
            format!("Your event \"{}\" was not approved", event.title),
            "was not approved",
        ),
        EventStatus::Pending => return Ok(event),
    };
    let mut body = format!("Your event \"{}\" {verdict}.", event.title);
    if let Some(notes) = &event.review_notes {
        body.push_str(&format!("\n\nReviewer notes: {notes}"));
    }
    send_best_effort(mailer, &event.contact_email, &subject, &body).await;

    Ok(event)
}

fn parse_date(raw: &str, field: &str) -> AppResult<i64> {
    parse_timestamp(raw).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be YYYY-MM-DD or an RFC 3339 timestamp"),
        )
        .with_detail("field", field)
    })
}
