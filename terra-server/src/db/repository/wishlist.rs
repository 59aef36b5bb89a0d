//! Wishlist Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Accommodation, WishlistEntry};
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn add(pool: &SqlitePool, user_id: &str, accommodation_id: i64) -> RepoResult<WishlistEntry> {
    sqlx::query_as::<_, WishlistEntry>(
        "INSERT INTO wishlist_entries (user_id, accommodation_id, created_at) VALUES (?, ?, ?) \
         RETURNING user_id, accommodation_id, created_at",
    )
    .bind(user_id)
    .bind(accommodation_id)
    .bind(now_millis())
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::WishlistEntryExists,
            format!("Accommodation {accommodation_id} is already on the wishlist"),
        ),
        other => other,
    })
}

pub async fn remove(pool: &SqlitePool, user_id: &str, accommodation_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM wishlist_entries WHERE user_id = ? AND accommodation_id = ?")
        .bind(user_id)
        .bind(accommodation_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::WishlistEntryNotFound,
            format!("Accommodation {accommodation_id} is not on the wishlist"),
        ));
    }
    Ok(())
}

/// Wishlisted accommodations, most recently added first
pub async fn list_accommodations(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<Accommodation>> {
    let list = sqlx::query_as::<_, Accommodation>(
        "SELECT a.id, a.owner_id, a.property_type, a.name, a.description, a.email, a.phone, \
                a.address, a.city, a.province, a.amenities, a.certifications, a.accepts_terms, \
                a.marketing_consent, a.created_at, a.updated_at \
         FROM wishlist_entries w JOIN accommodations a ON a.id = w.accommodation_id \
         WHERE w.user_id = ? ORDER BY w.created_at DESC, a.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(list)
}
