//! Phone number handling shared by the booking and login flows.

use crate::errors::ValidationError;

/// Country prefix applied to numbers entered without one.
pub const DEFAULT_COUNTRY_PREFIX: &str = "+91";

/// Checks that a customer phone is exactly ten ASCII digits.
pub fn validate_local_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// One-time codes are six ASCII digits.
pub fn validate_verification_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidVerificationCode)
    }
}

/// Converts a destination to international format.
///
/// Whitespace is stripped everywhere; numbers without a leading `+` get the
/// default country prefix.
pub fn normalize_destination(destination: &str) -> String {
    let compact: String = destination.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with('+') {
        compact
    } else {
        format!("{}{}", DEFAULT_COUNTRY_PREFIX, compact)
    }
}
