//! Loose validation and typed accessors for the `details` payload.
//!
//! Details are stored opaquely as JSON; the shape depends on the
//! application kind. Validation only checks the fields relevant to that
//! kind when they are present - unrecognized extra sub-fields pass
//! through untouched.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::error::ApplicationError;
use super::types::ApplicationKind;

/// Validates a details payload for the given kind.
///
/// The payload must be a JSON object or null/absent. Known fields are
/// type-checked when present: amounts must be positive numbers, textual
/// fields must be strings, and guarantor/next-of-kin must be objects.
///
/// # Errors
///
/// Returns `ApplicationError::Validation` naming the offending field.
pub fn validate_details(kind: ApplicationKind, details: &Value) -> Result<(), ApplicationError> {
    let map = match details {
        Value::Null => return Ok(()),
        Value::Object(map) => map,
        _ => {
            return Err(ApplicationError::Validation(
                "details must be an object".into(),
            ));
        }
    };

    match kind {
        ApplicationKind::Loan => {
            require_positive_amount(map.get("amount"))?;
            require_string(map, "duration")?;
            require_string(map, "purpose")?;
            require_string(map, "nin")?;
            require_object(map, "guarantor")?;
        }
        ApplicationKind::Investment => {
            require_positive_amount(map.get("amount"))?;
            require_string(map, "duration")?;
            require_object(map, "next_of_kin")?;
        }
        ApplicationKind::Forex => {
            require_string(map, "experience_level")?;
            require_string(map, "goals")?;
            require_string(map, "message")?;
        }
    }

    Ok(())
}

/// Extracts the loan amount from a details payload.
///
/// Accepts a JSON number or a numeric string; anything else (or a missing
/// field) yields `None`. The reconciler treats `None` as zero.
#[must_use]
pub fn loan_amount(details: &Value) -> Option<Decimal> {
    match details.get("amount") {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Extracts the duration field from a details payload.
#[must_use]
pub fn loan_duration(details: &Value) -> Option<&str> {
    details.get("duration").and_then(Value::as_str)
}

/// Writes an approval-time amount override into a details payload.
///
/// Used when an admin approves a Loan with an adjusted amount; the
/// reconciler reads the figure back out of details, so the override must
/// land there before the status flip.
pub fn set_loan_amount(details: &mut Value, amount: Decimal) {
    if !details.is_object() {
        *details = Value::Object(serde_json::Map::new());
    }
    if let Some(map) = details.as_object_mut() {
        map.insert("amount".to_string(), Value::String(amount.to_string()));
    }
}

fn require_positive_amount(value: Option<&Value>) -> Result<(), ApplicationError> {
    match value {
        None | Some(Value::Null) => Ok(()),
        Some(v) => {
            let amount = match v {
                Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
                Value::String(s) => Decimal::from_str(s.trim()).ok(),
                _ => None,
            };
            match amount {
                Some(a) if a > Decimal::ZERO => Ok(()),
                _ => Err(ApplicationError::Validation(
                    "amount must be a positive number".into(),
                )),
            }
        }
    }
}

fn require_string(
    map: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<(), ApplicationError> {
    match map.get(field) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ApplicationError::Validation(format!(
            "{field} must be a string"
        ))),
    }
}

fn require_object(
    map: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<(), ApplicationError> {
    match map.get(field) {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(ApplicationError::Validation(format!(
            "{field} must be an object"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_null_details_accepted() {
        assert!(validate_details(ApplicationKind::Loan, &Value::Null).is_ok());
    }

    #[test]
    fn test_loan_details_happy_path() {
        let details = json!({
            "amount": 50000,
            "duration": "12 months",
            "purpose": "Working capital",
            "nin": "12345678901",
            "guarantor": {"name": "John Doe", "phone": "555-0101"}
        });
        assert!(validate_details(ApplicationKind::Loan, &details).is_ok());
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let details = json!({
            "amount": 50000,
            "referral_code": "FRIEND-2026",
            "utm_source": "newsletter"
        });
        assert!(validate_details(ApplicationKind::Loan, &details).is_ok());
    }

    #[test]
    fn test_non_object_details_rejected() {
        assert!(validate_details(ApplicationKind::Forex, &json!("free text")).is_err());
        assert!(validate_details(ApplicationKind::Loan, &json!([1, 2])).is_err());
    }

    #[test]
    fn test_negative_or_malformed_amount_rejected() {
        assert!(validate_details(ApplicationKind::Loan, &json!({"amount": -5})).is_err());
        assert!(validate_details(ApplicationKind::Loan, &json!({"amount": 0})).is_err());
        assert!(validate_details(ApplicationKind::Loan, &json!({"amount": "lots"})).is_err());
        assert!(
            validate_details(ApplicationKind::Investment, &json!({"amount": {"v": 1}})).is_err()
        );
    }

    #[test]
    fn test_wrongly_typed_known_fields_rejected() {
        assert!(validate_details(ApplicationKind::Loan, &json!({"duration": 12})).is_err());
        assert!(validate_details(ApplicationKind::Loan, &json!({"guarantor": "Bob"})).is_err());
        assert!(
            validate_details(ApplicationKind::Forex, &json!({"experience_level": true})).is_err()
        );
    }

    #[test]
    fn test_loan_amount_accepts_number_and_string() {
        assert_eq!(loan_amount(&json!({"amount": 50000})), Some(dec!(50000)));
        assert_eq!(
            loan_amount(&json!({"amount": "20000.50"})),
            Some(dec!(20000.50))
        );
        assert_eq!(loan_amount(&json!({"amount": "junk"})), None);
        assert_eq!(loan_amount(&json!({})), None);
        assert_eq!(loan_amount(&Value::Null), None);
    }

    #[test]
    fn test_set_loan_amount_overrides_in_place() {
        let mut details = json!({"amount": 50000, "duration": "12 months"});
        set_loan_amount(&mut details, dec!(45000));
        assert_eq!(loan_amount(&details), Some(dec!(45000)));
        assert_eq!(loan_duration(&details), Some("12 months"));
    }

    #[test]
    fn test_set_loan_amount_on_null_creates_object() {
        let mut details = Value::Null;
        set_loan_amount(&mut details, dec!(1000));
        assert_eq!(loan_amount(&details), Some(dec!(1000)));
    }
}
