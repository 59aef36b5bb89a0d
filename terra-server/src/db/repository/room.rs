//! Room Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Room, RoomCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, accommodation_id, name, room_type, price_per_night, description, \
                       amenities, images, is_available, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let sql = format!("SELECT {COLUMNS} FROM rooms WHERE id = ?");
    let room = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

/// Rooms of one accommodation; `only_available` hides rooms switched off
/// by the owner
pub async fn find_by_accommodation(
    pool: &SqlitePool,
    accommodation_id: i64,
    only_available: bool,
) -> RepoResult<Vec<Room>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM rooms \
         WHERE accommodation_id = ? AND (? = 0 OR is_available = 1) \
         ORDER BY price_per_night, id"
    );
    let rooms = sqlx::query_as::<_, Room>(&sql)
        .bind(accommodation_id)
        .bind(only_available)
        .fetch_all(pool)
        .await?;
    Ok(rooms)
}

pub async fn create(
    pool: &SqlitePool,
    accommodation_id: i64,
    data: &RoomCreate,
    images: &[String],
) -> RepoResult<Room> {
    let amenities = serde_json::to_string(&data.amenities).unwrap_or_else(|_| "[]".to_string());
    let images = serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string());

    let sql = format!(
        "INSERT INTO rooms (accommodation_id, name, room_type, price_per_night, description, \
             amenities, images, is_available, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?) RETURNING {COLUMNS}"
    );
    let room = sqlx::query_as::<_, Room>(&sql)
        .bind(accommodation_id)
        .bind(&data.name)
        .bind(data.room_type)
        .bind(data.price_per_night)
        .bind(&data.description)
        .bind(amenities)
        .bind(images)
        .bind(now_millis())
        .fetch_one(pool)
        .await?;
    Ok(room)
}

pub async fn set_availability(pool: &SqlitePool, id: i64, is_available: bool) -> RepoResult<Room> {
    let sql = format!("UPDATE rooms SET is_available = ? WHERE id = ? RETURNING {COLUMNS}");
    sqlx::query_as::<_, Room>(&sql)
        .bind(is_available)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Delete a room that has never been booked.
///
/// Booked rooms keep their history; owners switch them off instead.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let booked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if booked > 0 {
        return Err(RepoError::Business(
            ErrorCode::RoomHasBookings,
            format!("Room {id} has {booked} booking(s); mark it unavailable instead"),
        ));
    }

    let rows = sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::repository::{accommodation, testing, user};
    use shared::models::{PropertyType, RoomType};

    pub(crate) fn sample(price: f64) -> RoomCreate {
        RoomCreate {
            name: "Koppie View".into(),
            room_type: RoomType::Double,
            price_per_night: price,
            description: None,
            amenities: vec!["fan".into()],
        }
    }

    /// Owner `owner_r` with a lodge; returns the accommodation id
    pub(crate) async fn lodge(pool: &SqlitePool) -> i64 {
        user::provision(pool, "owner_r", None, None, false).await.unwrap();
        accommodation::create(
            pool,
            "owner_r",
            &accommodation::tests::sample(PropertyType::Lodge),
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn create_and_toggle() {
        let pool = testing::pool().await;
        let acc_id = lodge(&pool).await;

        let room = create(&pool, acc_id, &sample(500.0), &["/uploads/rooms/a.jpg".into()])
            .await
            .unwrap();
        assert!(room.is_available);
        assert_eq!(room.room_type, RoomType::Double);
        assert_eq!(room.images, vec!["/uploads/rooms/a.jpg"]);

        let off = set_availability(&pool, room.id, false).await.unwrap();
        assert!(!off.is_available);

        let visible = find_by_accommodation(&pool, acc_id, true).await.unwrap();
        assert!(visible.is_empty());
        let all = find_by_accommodation(&pool, acc_id, false).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn delete_unbooked_room() {
        let pool = testing::pool().await;
        let acc_id = lodge(&pool).await;
        let room = create(&pool, acc_id, &sample(300.0), &[]).await.unwrap();

        delete(&pool, room.id).await.unwrap();
        assert!(find_by_id(&pool, room.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, room.id).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
