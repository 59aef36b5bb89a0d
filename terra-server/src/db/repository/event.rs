//! Event Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Event, EventStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, submitted_by, title, description, location, start_at, end_at, \
                       contact_email, status, is_priority, review_notes, reviewed_by, \
                       reviewed_at, created_at";

/// Validated submission, times already parsed
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub submitted_by: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub start_at: i64,
    pub end_at: Option<i64>,
    pub contact_email: &'a str,
    pub is_priority: bool,
}

pub async fn create(pool: &SqlitePool, new: &NewEvent<'_>) -> RepoResult<Event> {
    let sql = format!(
        "INSERT INTO events (submitted_by, title, description, location, start_at, end_at, \
             contact_email, status, is_priority, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?) RETURNING {COLUMNS}"
    );
    let event = sqlx::query_as::<_, Event>(&sql)
        .bind(new.submitted_by)
        .bind(new.title)
        .bind(new.description)
        .bind(new.location)
        .bind(new.start_at)
        .bind(new.end_at)
        .bind(new.contact_email)
        .bind(new.is_priority)
        .bind(now_millis())
        .fetch_one(pool)
        .await?;
    Ok(event)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Event>> {
    let sql = format!("SELECT {COLUMNS} FROM events WHERE id = ?");
    let event = sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(event)
}

/// Approved events in date order (public calendar)
pub async fn find_approved(pool: &SqlitePool) -> RepoResult<Vec<Event>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM events WHERE status = 'approved' ORDER BY start_at, id"
    );
    let list = sqlx::query_as::<_, Event>(&sql).fetch_all(pool).await?;
    Ok(list)
}

pub async fn find_by_submitter(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<Event>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM events WHERE submitted_by = ? ORDER BY created_at DESC, id DESC"
    );
    let list = sqlx::query_as::<_, Event>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(list)
}

/// Admin queue: priority submissions first, then oldest first
pub async fn find_for_review(
    pool: &SqlitePool,
    status: Option<EventStatus>,
) -> RepoResult<Vec<Event>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM events WHERE (?1 IS NULL OR status = ?1) \
         ORDER BY is_priority DESC, created_at, id"
    );
    let list = sqlx::query_as::<_, Event>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(list)
}

/// Move a pending event to `status`.
///
/// The `status = 'pending'` guard makes the transition happen at most once
/// even if two admins review concurrently.
pub async fn review(
    pool: &SqlitePool,
    id: i64,
    status: EventStatus,
    notes: Option<&str>,
    reviewer: &str,
) -> RepoResult<Event> {
    let sql = format!(
        "UPDATE events SET status = ?, review_notes = ?, reviewed_by = ?, reviewed_at = ? \
         WHERE id = ? AND status = 'pending' RETURNING {COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Event>(&sql)
        .bind(status)
        .bind(notes)
        .bind(reviewer)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match updated {
        Some(event) => Ok(event),
        None => match find_by_id(pool, id).await? {
            None => Err(RepoError::Business(
                ErrorCode::EventNotFound,
                format!("Event {id} not found"),
            )),
            Some(existing) => Err(RepoError::Business(
                ErrorCode::EventAlreadyReviewed,
                format!("Event {id} is already {}", existing.status.as_str()),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{testing, user};

    fn submission<'a>(user_id: &'a str, title: &'a str, priority: bool) -> NewEvent<'a> {
        NewEvent {
            submitted_by: user_id,
            title,
            description: "Community clean-up",
            location: "Muizenberg",
            start_at: 1_717_200_000_000,
            end_at: None,
            contact_email: "host@terra.test",
            is_priority: priority,
        }
    }

    #[tokio::test]
    async fn review_is_one_shot() {
        let pool = testing::pool().await;
        user::provision(&pool, "host", None, None, false).await.unwrap();
        let event = create(&pool, &submission("host", "Beach clean-up", false))
            .await
            .unwrap();
        assert_eq!(event.status, EventStatus::Pending);

        let approved = review(&pool, event.id, EventStatus::Approved, Some("Great"), "admin")
            .await
            .unwrap();
        assert_eq!(approved.status, EventStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("admin"));
        assert!(approved.reviewed_at.is_some());

        let again = review(&pool, event.id, EventStatus::Rejected, None, "admin").await;
        assert!(matches!(
            again,
            Err(RepoError::Business(ErrorCode::EventAlreadyReviewed, _))
        ));

        let missing = review(&pool, 999, EventStatus::Approved, None, "admin").await;
        assert!(matches!(
            missing,
            Err(RepoError::Business(ErrorCode::EventNotFound, _))
        ));
    }

    #[tokio::test]
    async fn listings_by_audience() {
        let pool = testing::pool().await;
        user::provision(&pool, "host", None, None, false).await.unwrap();
        let a = create(&pool, &submission("host", "Market", false)).await.unwrap();
        let b = create(&pool, &submission("host", "Solar workshop", true)).await.unwrap();
        review(&pool, a.id, EventStatus::Approved, None, "admin").await.unwrap();

        let public = find_approved(&pool).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, a.id);

        let queue = find_for_review(&pool, None).await.unwrap();
        assert_eq!(queue[0].id, b.id);

        let pending = find_for_review(&pool, Some(EventStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);

        assert_eq!(find_by_submitter(&pool, "host").await.unwrap().len(), 2);
    }
}
