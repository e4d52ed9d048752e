//! Utility functions for the coupon service
//!
//! Request identifier validation shared by the controllers and the HTTP layer.

use std::sync::LazyLock;

use crate::error::CouponError;

/// Maximum length accepted for a customer or coupon id
pub const ID_MAX_LENGTH: usize = 64;

/// Regex pattern for validating opaque identifiers
static ID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[\w-]+$").expect("Invalid regex pattern"));

/// Check that an identifier is non-empty, bounded, and made of word characters or hyphens
///
/// # Examples
///
/// ```
/// use coupon_common::is_valid_id;
///
/// assert!(is_valid_id("0b6f7a52-3f4e-4f0c-9d7e-2a3c5b7d9e11"));
/// assert!(is_valid_id("c1"));
/// assert!(!is_valid_id(""));
/// assert!(!is_valid_id("with spaces"));
/// ```
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= ID_MAX_LENGTH && ID_PATTERN.is_match(id)
}

/// Validate a named identifier field, trimming surrounding whitespace
///
/// Returns the trimmed id on success.
pub fn validate_id<'a>(field: &str, id: &'a str) -> Result<&'a str, CouponError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CouponError::InvalidRequest(format!(
            "'{}' must not be empty",
            field
        )));
    }
    if !is_valid_id(id) {
        return Err(CouponError::InvalidRequest(format!(
            "'{}' is malformed",
            field
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("abc123"));
        assert!(is_valid_id("test_value"));
        assert!(is_valid_id("test-value"));
        assert!(is_valid_id("nonexistent"));
    }

    #[test]
    fn test_is_valid_id_rejects() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("test value"));
        assert!(!is_valid_id("test/value"));
        assert!(!is_valid_id("id'; drop table coupons; --"));
        assert!(!is_valid_id(&"a".repeat(ID_MAX_LENGTH + 1)));
    }

    #[test]
    fn test_validate_id_trims() {
        assert_eq!(validate_id("coupon_id", "  c1 "), Ok("c1"));
    }

    #[test]
    fn test_validate_id_empty() {
        let err = validate_id("customer_id", "   ").unwrap_err();
        assert_eq!(
            err,
            CouponError::InvalidRequest("'customer_id' must not be empty".to_string())
        );
    }
}
