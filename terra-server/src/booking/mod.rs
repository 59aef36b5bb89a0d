//! Booking domain
//!
//! - [`Stay`]: a validated half-open `[check_in, check_out)` interval
//! - [`quote`]: nights × nightly rate in decimal arithmetic
//! - [`service`]: availability check and race-free booking creation

pub mod service;

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::{DAY_MILLIS, parse_timestamp};

pub use service::{
    BookingOutcome, cancel_booking, check_availability, create_booking, room_availability,
};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Longest stay accepted in one booking
pub const MAX_NIGHTS: i64 = 365;

/// Most guests accepted in one booking
pub const MAX_GUESTS: i32 = 50;

/// A stay with `check_in < check_out`, both UTC epoch millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: i64,
    pub check_out: i64,
}

impl Stay {
    /// Build a stay, rejecting zero and negative lengths
    pub fn new(check_in: i64, check_out: i64) -> AppResult<Self> {
        if check_out <= check_in {
            return Err(AppError::new(ErrorCode::InvalidStay)
                .with_detail("checkInDate", check_in)
                .with_detail("checkOutDate", check_out));
        }
        let stay = Self {
            check_in,
            check_out,
        };
        if stay.nights() > MAX_NIGHTS {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Stays are limited to {MAX_NIGHTS} nights"),
            ));
        }
        Ok(stay)
    }

    /// Parse client-supplied dates (`YYYY-MM-DD` or RFC 3339)
    pub fn parse(check_in: Option<&str>, check_out: Option<&str>) -> AppResult<Self> {
        let check_in = parse_date_field(check_in, "checkInDate")?;
        let check_out = parse_date_field(check_out, "checkOutDate")?;
        Self::new(check_in, check_out)
    }

    /// Nights charged: partial days round up
    pub fn nights(&self) -> i64 {
        let span = self.check_out - self.check_in;
        (span + DAY_MILLIS - 1) / DAY_MILLIS
    }

    /// Half-open interval overlap
    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

fn parse_date_field(value: Option<&str>, field: &str) -> AppResult<i64> {
    let raw = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(AppError::required_field(field)),
    };
    parse_timestamp(raw).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be YYYY-MM-DD or an RFC 3339 timestamp"),
        )
        .with_detail("field", field)
    })
}

/// Guest count must be within `1..=MAX_GUESTS`
pub fn validate_guests(guests: Option<i32>) -> AppResult<i32> {
    match guests {
        None => Err(AppError::required_field("guests")),
        Some(g) if g < 1 => Err(AppError::validation("guests must be at least 1")
            .with_detail("field", "guests")),
        Some(g) if g > MAX_GUESTS => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("guests must be at most {MAX_GUESTS}"),
        )
        .with_detail("field", "guests")),
        Some(g) => Ok(g),
    }
}

/// Total price for a stay: `nightly × nights`, rounded to cents
pub fn quote(nightly: f64, stay: &Stay) -> AppResult<f64> {
    let rate = Decimal::from_f64(nightly)
        .filter(|r| !r.is_sign_negative())
        .ok_or_else(|| AppError::internal(format!("Room has an invalid nightly rate: {nightly}")))?;
    let total = (rate * Decimal::from(stay.nights()))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    total
        .to_f64()
        .ok_or_else(|| AppError::internal("Booking total out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str) -> i64 {
        parse_timestamp(date).unwrap()
    }

    #[test]
    fn three_nights_at_500() {
        let stay = Stay::new(day("2024-06-01"), day("2024-06-04")).unwrap();
        assert_eq!(stay.nights(), 3);
        assert_eq!(quote(500.0, &stay).unwrap(), 1500.0);
    }

    #[test]
    fn partial_days_round_up() {
        let check_in = parse_timestamp("2024-06-01T14:00:00Z").unwrap();
        let check_out = parse_timestamp("2024-06-03T10:00:00Z").unwrap();
        let stay = Stay::new(check_in, check_out).unwrap();
        assert_eq!(stay.nights(), 2);

        let short = Stay::new(check_in, check_in + 1).unwrap();
        assert_eq!(short.nights(), 1);
    }

    #[test]
    fn zero_and_negative_stays_are_rejected() {
        let same = Stay::new(day("2024-06-01"), day("2024-06-01")).unwrap_err();
        assert_eq!(same.code, ErrorCode::InvalidStay);

        let backwards = Stay::new(day("2024-06-04"), day("2024-06-01")).unwrap_err();
        assert_eq!(backwards.code, ErrorCode::InvalidStay);
    }

    #[test]
    fn overly_long_stays_are_rejected() {
        let err = Stay::new(day("2024-01-01"), day("2025-06-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn overlap_is_half_open() {
        let existing = Stay::new(day("2024-06-01"), day("2024-06-04")).unwrap();
        let clash = Stay::new(day("2024-06-03"), day("2024-06-05")).unwrap();
        let after = Stay::new(day("2024-06-04"), day("2024-06-06")).unwrap();
        let before = Stay::new(day("2024-05-30"), day("2024-06-01")).unwrap();
        let inside = Stay::new(day("2024-06-02"), day("2024-06-03")).unwrap();

        assert!(existing.overlaps(&clash));
        assert!(clash.overlaps(&existing));
        assert!(existing.overlaps(&inside));
        assert!(!existing.overlaps(&after));
        assert!(!existing.overlaps(&before));
    }

    #[test]
    fn parse_reports_missing_and_malformed_fields() {
        let missing = Stay::parse(None, Some("2024-06-04")).unwrap_err();
        assert_eq!(missing.code, ErrorCode::RequiredField);

        let blank = Stay::parse(Some("2024-06-01"), Some("  ")).unwrap_err();
        assert_eq!(blank.code, ErrorCode::RequiredField);

        let garbage = Stay::parse(Some("June 1st"), Some("2024-06-04")).unwrap_err();
        assert_eq!(garbage.code, ErrorCode::InvalidFormat);

        let ok = Stay::parse(Some("2024-06-01"), Some("2024-06-04T00:00:00Z")).unwrap();
        assert_eq!(ok.nights(), 3);
    }

    #[test]
    fn guests_bounds() {
        assert_eq!(validate_guests(None).unwrap_err().code, ErrorCode::RequiredField);
        assert_eq!(validate_guests(Some(0)).unwrap_err().code, ErrorCode::ValidationFailed);
        assert_eq!(validate_guests(Some(-2)).unwrap_err().code, ErrorCode::ValidationFailed);
        assert_eq!(
            validate_guests(Some(MAX_GUESTS + 1)).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert_eq!(validate_guests(Some(2)).unwrap(), 2);
    }

    #[test]
    fn quote_rounds_to_cents() {
        let stay = Stay::new(day("2024-06-01"), day("2024-06-04")).unwrap();
        assert_eq!(quote(333.335, &stay).unwrap(), 1000.01);
        assert_eq!(quote(0.1, &stay).unwrap(), 0.3);
        assert!(quote(-1.0, &stay).is_err());
        assert!(quote(f64::NAN, &stay).is_err());
    }
}
