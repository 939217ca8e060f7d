//! Normalization for self-service profile fields.

use super::ADDRESS_NOT_PROVIDED;

/// Normalizes a submitted phone number. Whitespace-only input clears the
/// stored number rather than persisting an empty string.
#[must_use]
pub fn normalize_phone(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a submitted address. Whitespace-only input resets the field
/// to the [`ADDRESS_NOT_PROVIDED`] sentinel so readers never see an empty
/// address.
#[must_use]
pub fn normalize_address(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        ADDRESS_NOT_PROVIDED.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_trimmed() {
        assert_eq!(normalize_phone(" 555-0100 "), Some("555-0100".to_string()));
    }

    #[test]
    fn test_blank_phone_clears_the_field() {
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("   "), None);
    }

    #[test]
    fn test_address_is_trimmed() {
        assert_eq!(normalize_address(" 1 Main St "), "1 Main St");
    }

    #[test]
    fn test_blank_address_resets_to_sentinel() {
        assert_eq!(normalize_address(""), ADDRESS_NOT_PROVIDED);
        assert_eq!(normalize_address(" \t "), ADDRESS_NOT_PROVIDED);
    }
}
