//! Booking workflow
//!
//! `check_availability` is a pure read. `create_booking` validates, prices
//! the stay and writes through the conditional insert in
//! [`repository::booking::insert_if_available`], so a stay is never granted
//! twice even when requests race.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Booking, BookingRequest, PaymentMethod, Role};
use sqlx::SqlitePool;

use super::{Stay, quote, validate_guests};
use crate::auth::CurrentUser;
use crate::db::repository::{self, booking::NewBooking};

/// Result of a creation attempt that passed validation
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(Booking),
    /// An overlapping booking already holds the room
    Unavailable,
}

/// Whether `room_id` is free for the whole stay.
///
/// Fails closed: a storage error reports the room as unavailable.
pub async fn check_availability(pool: &SqlitePool, room_id: i64, stay: &Stay) -> bool {
    match repository::booking::has_overlap(pool, room_id, stay.check_in, stay.check_out).await {
        Ok(taken) => !taken,
        Err(e) => {
            tracing::warn!(room_id, error = %e, "Availability check failed, reporting unavailable");
            false
        }
    }
}

/// Availability as a guest sees it: the room must exist, be switched on and
/// be free for the stay. Agrees with what [`create_booking`] would decide.
pub async fn room_availability(pool: &SqlitePool, room_id: i64, stay: &Stay) -> AppResult<bool> {
    let room = repository::room::find_by_id(pool, room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound).with_detail("room", room_id))?;
    if !room.is_available {
        return Ok(false);
    }
    Ok(check_availability(pool, room_id, stay).await)
}

/// Validate a booking request and create it if the room is free.
///
/// Validation, missing rooms and switched-off rooms are errors; an
/// overlapping stay is [`BookingOutcome::Unavailable`] with the table
/// untouched.
pub async fn create_booking(
    pool: &SqlitePool,
    user_id: &str,
    request: &BookingRequest,
) -> AppResult<BookingOutcome> {
    let room_id = request.room.ok_or_else(|| AppError::required_field("room"))?;
    let stay = Stay::parse(
        request.check_in_date.as_deref(),
        request.check_out_date.as_deref(),
    )?;
    let guests = validate_guests(request.guests)?;

    let room = repository::room::find_by_id(pool, room_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound).with_detail("room", room_id))?;
    if !room.is_available {
        return Err(AppError::with_message(
            ErrorCode::RoomUnavailable,
            "Room is not available",
        )
        .with_detail("room", room_id));
    }

    let total_price = quote(room.price_per_night, &stay)?;

    let new = NewBooking {
        user_id,
        room_id,
        accommodation_id: room.accommodation_id,
        check_in: stay.check_in,
        check_out: stay.check_out,
        guests,
        total_price,
        payment_method: request.payment_method.unwrap_or(PaymentMethod::PayAtProperty),
    };

    match repository::booking::insert_if_available(pool, &new).await? {
        Some(booking) => {
            tracing::info!(
                booking_id = booking.id,
                room_id,
                user_id,
                nights = stay.nights(),
                total_price,
                "Booking created"
            );
            Ok(BookingOutcome::Created(booking))
        }
        None => {
            tracing::info!(room_id, user_id, "Booking refused, stay overlaps an existing booking");
            Ok(BookingOutcome::Unavailable)
        }
    }
}

/// Cancel a booking as its guest or as the owner of its accommodation.
///
/// Admins may cancel any booking.
pub async fn cancel_booking(
    pool: &SqlitePool,
    user: &CurrentUser,
    booking_id: i64,
) -> AppResult<Booking> {
    let booking = repository::booking::find_by_id(pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    let is_guest = booking.user_id == user.id;
    let is_host = match user.role {
        Role::Admin => true,
        Role::Owner => repository::accommodation::find_by_owner(pool, &user.id)
            .await?
            .is_some_and(|acc| acc.id == booking.accommodation_id),
        Role::User | Role::Guest => false,
    };
    if !is_guest && !is_host {
        return Err(AppError::permission_denied(
            "Only the guest or the host can cancel this booking",
        ));
    }

    let cancelled = repository::booking::cancel(pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotCancellable))?;

    tracing::info!(booking_id, cancelled_by = %user.id, "Booking cancelled");
    Ok(cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{room, testing, user};
    use shared::models::BookingStatus;

    fn request(room: i64, from: &str, to: &str, guests: i32) -> BookingRequest {
        BookingRequest {
            room: Some(room),
            check_in_date: Some(from.into()),
            check_out_date: Some(to.into()),
            guests: Some(guests),
            payment_method: None,
        }
    }

    fn guest(id: &str, role: Role) -> CurrentUser {
        CurrentUser {
            id: id.into(),
            email: None,
            name: None,
            role,
        }
    }

    async fn setup() -> (SqlitePool, i64) {
        let pool = testing::pool().await;
        let acc_id = room::tests::lodge(&pool).await;
        let room = room::create(&pool, acc_id, &room::tests::sample(500.0), &[])
            .await
            .unwrap();
        user::provision(&pool, "guest", None, None, false).await.unwrap();
        user::provision(&pool, "stranger", None, None, false).await.unwrap();
        (pool, room.id)
    }

    fn created(outcome: BookingOutcome) -> Booking {
        match outcome {
            BookingOutcome::Created(b) => b,
            BookingOutcome::Unavailable => panic!("expected a booking"),
        }
    }

    #[tokio::test]
    async fn prices_and_creates() {
        let (pool, room_id) = setup().await;
        let booking = created(
            create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 2))
                .await
                .unwrap(),
        );
        assert_eq!(booking.total_price, 1500.0);
        assert_eq!(booking.guests, 2);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_method, PaymentMethod::PayAtProperty);
    }

    #[tokio::test]
    async fn overlapping_request_leaves_table_unchanged() {
        let (pool, room_id) = setup().await;
        created(
            create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 2))
                .await
                .unwrap(),
        );

        let stay = Stay::parse(Some("2024-06-03"), Some("2024-06-05")).unwrap();
        assert!(!check_availability(&pool, room_id, &stay).await);

        let outcome = create_booking(&pool, "guest", &request(room_id, "2024-06-03", "2024-06-05", 1))
            .await
            .unwrap();
        assert!(matches!(outcome, BookingOutcome::Unavailable));
        assert_eq!(repository::booking::count(&pool).await.unwrap(), 1);

        let next = Stay::parse(Some("2024-06-04"), Some("2024-06-06")).unwrap();
        assert!(check_availability(&pool, room_id, &next).await);
    }

    #[tokio::test]
    async fn availability_check_is_idempotent() {
        let (pool, room_id) = setup().await;
        let stay = Stay::parse(Some("2024-06-01"), Some("2024-06-04")).unwrap();
        for _ in 0..3 {
            assert!(check_availability(&pool, room_id, &stay).await);
        }
        assert_eq!(repository::booking::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn availability_fails_closed() {
        let (pool, room_id) = setup().await;
        let stay = Stay::parse(Some("2024-06-01"), Some("2024-06-04")).unwrap();
        pool.close().await;
        assert!(!check_availability(&pool, room_id, &stay).await);
    }

    #[tokio::test]
    async fn rejects_bad_requests() {
        let (pool, room_id) = setup().await;

        let mut missing_room = request(room_id, "2024-06-01", "2024-06-04", 2);
        missing_room.room = None;
        let err = create_booking(&pool, "guest", &missing_room).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = create_booking(&pool, "guest", &request(room_id, "2024-06-04", "2024-06-04", 2))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStay);

        let err = create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 0))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = create_booking(&pool, "guest", &request(9999, "2024-06-01", "2024-06-04", 2))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);

        assert_eq!(repository::booking::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn switched_off_room_is_refused() {
        let (pool, room_id) = setup().await;
        room::set_availability(&pool, room_id, false).await.unwrap();

        let err = create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 2))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomUnavailable);
        assert_eq!(err.message, "Room is not available");

        // The public check agrees with the refusal
        let stay = Stay::parse(Some("2024-06-01"), Some("2024-06-04")).unwrap();
        assert!(!room_availability(&pool, room_id, &stay).await.unwrap());
    }

    #[tokio::test]
    async fn room_availability_follows_booking_rules() {
        let (pool, room_id) = setup().await;
        let stay = Stay::parse(Some("2024-06-01"), Some("2024-06-04")).unwrap();
        assert!(room_availability(&pool, room_id, &stay).await.unwrap());

        let err = room_availability(&pool, 9999, &stay).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);

        created(
            create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 2))
                .await
                .unwrap(),
        );
        assert!(!room_availability(&pool, room_id, &stay).await.unwrap());
    }

    #[tokio::test]
    async fn cancel_rules() {
        let (pool, room_id) = setup().await;
        let booking = created(
            create_booking(&pool, "guest", &request(room_id, "2024-06-01", "2024-06-04", 2))
                .await
                .unwrap(),
        );

        let err = cancel_booking(&pool, &guest("stranger", Role::User), booking.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);

        // owner_r owns the lodge the room belongs to
        let cancelled = cancel_booking(&pool, &guest("owner_r", Role::Owner), booking.id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = cancel_booking(&pool, &guest("guest", Role::User), booking.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingNotCancellable);

        let err = cancel_booking(&pool, &guest("guest", Role::User), 777)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingNotFound);

        // the freed dates can be booked again
        created(
            create_booking(&pool, "guest", &request(room_id, "2024-06-02", "2024-06-03", 1))
                .await
                .unwrap(),
        );
    }
}
