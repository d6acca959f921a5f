//! Input validation helpers
//!
//! Payload structs derive `validator::Validate`; handlers call
//! [`validate_payload`] so every rejection becomes a 400 `ValidationFailed`
//! with the offending fields listed in `details`.

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use crate::utils::{AppError, AppResult};

// ── Text length limits ──────────────────────────────────────────────

/// Person and organization names
pub const MAX_NAME_LEN: usize = 120;

/// Phone numbers as typed, spaces and `+` included
pub const MAX_PHONE_LEN: usize = 20;

/// Free-text search terms
pub const MAX_SEARCH_LEN: usize = 100;

/// Run derive-based validation and convert failures to [`AppError`]
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(validation_error)
}

fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .errors()
        .keys()
        .map(|k| camel_case(k))
        .collect();
    fields.sort();

    AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
        .with_detail("fields", fields)
}

/// Wire name of a struct field (`follow_up_date` -> `followUpDate`)
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Money fields may be zero (free plans) but never negative
pub fn validate_non_negative(value: Decimal, field: &str) -> AppResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::LeadCreate;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Jane", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(200), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "q", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "q", 5).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO, "amount").is_ok());
        assert!(validate_non_negative(Decimal::new(-1, 0), "amount").is_err());
    }

    #[test]
    fn test_payload_errors_list_fields() {
        let lead = LeadCreate {
            name: String::new(),
            phone: "1".into(),
            email: None,
            source: None,
            status: Default::default(),
            follow_up_date: None,
            notes: None,
        };
        let err = validate_payload(&lead).unwrap_err();
        assert_eq!(err.code, crate::utils::ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid fields: name, phone");
    }

    #[test]
    fn test_field_names_use_wire_case() {
        assert_eq!(camel_case("follow_up_date"), "followUpDate");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
