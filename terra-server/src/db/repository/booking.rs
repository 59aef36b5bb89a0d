//! Booking Repository
//!
//! Stays are half-open `[check_in, check_out)` intervals in epoch millis.
//! Two stays on the same room overlap iff `a.check_in < b.check_out` and
//! `b.check_in < a.check_out`; cancelled bookings never block.

use super::{RepoError, RepoResult};
use shared::models::{Booking, BookingDetail, BookingStatus, PaymentMethod};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, user_id, room_id, accommodation_id, check_in, check_out, guests, \
                       total_price, status, payment_method, is_paid, created_at";

const DETAIL_SELECT: &str = "SELECT b.id, b.user_id, b.room_id, b.accommodation_id, b.check_in, \
                                    b.check_out, b.guests, b.total_price, b.status, \
                                    b.payment_method, b.is_paid, b.created_at, \
                                    r.name AS room_name, a.name AS accommodation_name \
                             FROM bookings b \
                             JOIN rooms r ON r.id = b.room_id \
                             JOIN accommodations a ON a.id = b.accommodation_id";

/// Values for a booking about to be written
#[derive(Debug, Clone)]
pub struct NewBooking<'a> {
    pub user_id: &'a str,
    pub room_id: i64,
    pub accommodation_id: i64,
    pub check_in: i64,
    pub check_out: i64,
    pub guests: i32,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
}

/// Whether any non-cancelled booking on `room_id` overlaps the stay
pub async fn has_overlap(
    pool: &SqlitePool,
    room_id: i64,
    check_in: i64,
    check_out: i64,
) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE room_id = ? AND status != 'cancelled' \
               AND check_in < ? AND check_out > ?)",
    )
    .bind(room_id)
    .bind(check_out)
    .bind(check_in)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Insert the booking only if the room is free for the stay.
///
/// The overlap probe and the insert are one statement, so SQLite holds the
/// write lock across both and concurrent callers are serialized. `None`
/// means an overlapping booking exists and nothing was written.
pub async fn insert_if_available(
    pool: &SqlitePool,
    new: &NewBooking<'_>,
) -> RepoResult<Option<Booking>> {
    let sql = format!(
        "INSERT INTO bookings (user_id, room_id, accommodation_id, check_in, check_out, guests, \
             total_price, status, payment_method, is_paid, created_at) \
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8, 0, ?9 \
         WHERE NOT EXISTS ( \
             SELECT 1 FROM bookings \
             WHERE room_id = ?2 AND status != 'cancelled' \
               AND check_in < ?5 AND check_out > ?4 \
         ) \
         RETURNING {COLUMNS}"
    );
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(new.user_id)
        .bind(new.room_id)
        .bind(new.accommodation_id)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.guests)
        .bind(new.total_price)
        .bind(new.payment_method)
        .bind(now_millis())
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("SELECT {COLUMNS} FROM bookings WHERE id = ?");
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

/// A guest's bookings, newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<BookingDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE b.user_id = ? ORDER BY b.created_at DESC, b.id DESC");
    let list = sqlx::query_as::<_, BookingDetail>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(list)
}

/// Bookings at one accommodation, by arrival date
pub async fn find_by_accommodation(
    pool: &SqlitePool,
    accommodation_id: i64,
) -> RepoResult<Vec<BookingDetail>> {
    let sql = format!(
        "{DETAIL_SELECT} WHERE b.accommodation_id = ? ORDER BY b.check_in, b.id"
    );
    let list = sqlx::query_as::<_, BookingDetail>(&sql)
        .bind(accommodation_id)
        .fetch_all(pool)
        .await?;
    Ok(list)
}

/// Cancel a pending or confirmed booking. Returns `None` when the booking is
/// already cancelled.
pub async fn cancel(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!(
        "UPDATE bookings SET status = ? WHERE id = ? AND status != 'cancelled' RETURNING {COLUMNS}"
    );
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(BookingStatus::Cancelled)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    if booking.is_none() && find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(booking)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
