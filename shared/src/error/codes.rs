//! Unified error codes for TerraBook
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Listing errors (accommodations, rooms, menu, vegan businesses)
//! - 4xxx: Booking errors
//! - 5xxx: Event errors
//! - 6xxx: Wishlist errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Too many requests from the same client
    TooManyRequests = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Owner role required
    OwnerRequired = 2004,

    // ==================== 3xxx: Listing ====================
    /// Accommodation not found
    AccommodationNotFound = 3001,
    /// Owner already registered an accommodation
    AccommodationAlreadyRegistered = 3002,
    /// Room not found
    RoomNotFound = 3003,
    /// Menu item not found
    MenuItemNotFound = 3004,
    /// Operation does not fit the property type (rooms on a restaurant, ...)
    PropertyTypeMismatch = 3005,
    /// Too many images in one upload
    TooManyImages = 3006,
    /// Vegan business not found
    VeganBusinessNotFound = 3007,
    /// Room still referenced by bookings
    RoomHasBookings = 3008,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Room is not available for the requested dates
    RoomUnavailable = 4002,
    /// Stay has no positive length
    InvalidStay = 4003,
    /// Booking cannot be cancelled from its current status
    BookingNotCancellable = 4004,

    // ==================== 5xxx: Event ====================
    /// Event not found
    EventNotFound = 5001,
    /// Event was already reviewed
    EventAlreadyReviewed = 5002,
    /// Review status must be approved or rejected
    InvalidReviewStatus = 5003,

    // ==================== 6xxx: Wishlist ====================
    /// Accommodation already on the wishlist
    WishlistEntryExists = 6001,
    /// Accommodation not on the wishlist
    WishlistEntryNotFound = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Object storage error
    StorageError = 9004,
    /// Network error
    NetworkError = 9005,
    /// Timeout error
    TimeoutError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::OwnerRequired => "Owner role is required",

            // Listing
            ErrorCode::AccommodationNotFound => "Accommodation not found",
            ErrorCode::AccommodationAlreadyRegistered => "Accommodation already registered",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::PropertyTypeMismatch => "Operation not supported for this property type",
            ErrorCode::TooManyImages => "Too many images",
            ErrorCode::VeganBusinessNotFound => "Vegan business not found",
            ErrorCode::RoomHasBookings => "Room has bookings and cannot be deleted",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::RoomUnavailable => "Room is not available for the selected dates",
            ErrorCode::InvalidStay => "Check-out must be after check-in",
            ErrorCode::BookingNotCancellable => "Booking cannot be cancelled",

            // Event
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventAlreadyReviewed => "Event has already been reviewed",
            ErrorCode::InvalidReviewStatus => "Status must be approved or rejected",

            // Wishlist
            ErrorCode::WishlistEntryExists => "Accommodation is already on the wishlist",
            ErrorCode::WishlistEntryNotFound => "Accommodation is not on the wishlist",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageError => "Object storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::OwnerRequired),

            // Listing
            3001 => Ok(ErrorCode::AccommodationNotFound),
            3002 => Ok(ErrorCode::AccommodationAlreadyRegistered),
            3003 => Ok(ErrorCode::RoomNotFound),
            3004 => Ok(ErrorCode::MenuItemNotFound),
            3005 => Ok(ErrorCode::PropertyTypeMismatch),
            3006 => Ok(ErrorCode::TooManyImages),
            3007 => Ok(ErrorCode::VeganBusinessNotFound),
            3008 => Ok(ErrorCode::RoomHasBookings),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::RoomUnavailable),
            4003 => Ok(ErrorCode::InvalidStay),
            4004 => Ok(ErrorCode::BookingNotCancellable),

            // Event
            5001 => Ok(ErrorCode::EventNotFound),
            5002 => Ok(ErrorCode::EventAlreadyReviewed),
            5003 => Ok(ErrorCode::InvalidReviewStatus),

            // Wishlist
            6001 => Ok(ErrorCode::WishlistEntryExists),
            6002 => Ok(ErrorCode::WishlistEntryNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::NetworkError),
            9006 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::TooManyRequests.code(), 9);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::OwnerRequired.code(), 2004);

        assert_eq!(ErrorCode::RoomNotFound.code(), 3003);
        assert_eq!(ErrorCode::RoomUnavailable.code(), 4002);
        assert_eq!(ErrorCode::InvalidStay.code(), 4003);
        assert_eq!(ErrorCode::EventAlreadyReviewed.code(), 5002);
        assert_eq!(ErrorCode::WishlistEntryExists.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::RoomUnavailable));
        assert_eq!(ErrorCode::try_from(9004), Ok(ErrorCode::StorageError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1002), Err(InvalidErrorCode(1002)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_every_code_survives_u16() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::TooManyRequests,
            ErrorCode::TokenExpired,
            ErrorCode::OwnerRequired,
            ErrorCode::AccommodationAlreadyRegistered,
            ErrorCode::VeganBusinessNotFound,
            ErrorCode::BookingNotCancellable,
            ErrorCode::InvalidReviewStatus,
            ErrorCode::WishlistEntryNotFound,
            ErrorCode::TimeoutError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(u16::from(code)), Ok(code));
        }
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::RoomUnavailable).unwrap(),
            "4002"
        );

        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::EventNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("7001");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::BookingNotFound), "4001");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(ErrorCode::RoomNotFound.message(), "Room not found");
        assert_eq!(
            ErrorCode::RoomUnavailable.message(),
            "Room is not available for the selected dates"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }
}
