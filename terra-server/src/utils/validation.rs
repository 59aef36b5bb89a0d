//! Input validation helpers shared by handlers
//!
//! Validation failures are [`AppError`]s with a `field` detail so clients can
//! highlight the offending input.

use shared::error::{AppError, AppResult};
use validator::ValidateEmail;

/// Upper bound for prices and nightly rates
pub const MAX_PRICE: f64 = 1_000_000.0;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_TEXT_LEN: usize = 5_000;

/// Require a non-blank string of at most `max_len` characters
pub fn require_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field));
    }
    if value.chars().count() > max_len {
        return Err(
            AppError::validation(format!("{field} must be at most {max_len} characters"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// Like [`require_text`] but only checks the length when a value is present
pub fn optional_text(value: Option<&str>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        ))
        .with_detail("field", field)),
        _ => Ok(()),
    }
}

pub fn require_email(value: &str, field: &str) -> AppResult<()> {
    if !value.validate_email() {
        return Err(AppError::validation(format!("{field} must be a valid email address"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Price must be finite, non-negative and below [`MAX_PRICE`]
pub fn require_price(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{field} must be a finite number"))
            .with_detail("field", field));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!("{field} must be non-negative"))
            .with_detail("field", field));
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Trim entries and drop blanks and duplicates, keeping first-seen order
pub fn normalize_tags(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn blank_text_is_a_missing_field() {
        let err = require_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(require_text("Karoo Lodge", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn long_text_is_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = require_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(optional_text(Some(&long), "name", MAX_NAME_LEN).is_err());
        assert!(optional_text(None, "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn email_check() {
        assert!(require_email("stay@karoo.co.za", "email").is_ok());
        assert!(require_email("not-an-email", "email").is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(require_price(0.0, "price").is_ok());
        assert!(require_price(500.0, "price").is_ok());
        assert!(require_price(-1.0, "price").is_err());
        assert!(require_price(f64::NAN, "price").is_err());
        assert!(require_price(f64::INFINITY, "price").is_err());
        assert!(require_price(MAX_PRICE + 1.0, "price").is_err());
    }

    #[test]
    fn tags_are_normalized() {
        let tags = normalize_tags(vec![
            " solar ".into(),
            "".into(),
            "solar".into(),
            "borehole".into(),
        ]);
        assert_eq!(tags, vec!["solar", "borehole"]);
    }
}
