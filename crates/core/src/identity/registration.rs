//! Registration input validation and normalization.

use super::error::IdentityError;

/// Raw registration input as received from a caller.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Full name.
    pub full_name: String,
    /// Email; matched case-insensitively.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

/// Validated, normalized registration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Trimmed full name.
    pub full_name: String,
    /// Trimmed, lowercased email.
    pub email: String,
    /// Trimmed phone number.
    pub phone: String,
}

impl NewIdentity {
    /// Validates and normalizes registration input.
    ///
    /// Email is lowercased so lookups are case-insensitive; all fields are
    /// trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<Registration, IdentityError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(IdentityError::Validation("full_name is required".into()));
        }

        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(IdentityError::Validation("email is required".into()));
        }
        if !email.contains('@') {
            return Err(IdentityError::Validation(
                "email must contain '@'".into(),
            ));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(IdentityError::Validation("phone is required".into()));
        }

        Ok(Registration {
            full_name: full_name.to_string(),
            email,
            phone: phone.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(full_name: &str, email: &str, phone: &str) -> NewIdentity {
        NewIdentity {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_valid_registration_is_normalized() {
        let reg = input(" Jane Doe ", " Jane@X.COM ", " 555-0100 ")
            .validate()
            .unwrap();
        assert_eq!(reg.full_name, "Jane Doe");
        assert_eq!(reg.email, "jane@x.com");
        assert_eq!(reg.phone, "555-0100");
    }

    #[rstest]
    #[case("", "jane@x.com", "555-0100")]
    #[case("Jane Doe", "", "555-0100")]
    #[case("Jane Doe", "jane@x.com", "")]
    #[case("Jane Doe", "not-an-email", "555-0100")]
    #[case("   ", "jane@x.com", "555-0100")]
    fn test_invalid_registration_rejected(
        #[case] full_name: &str,
        #[case] email: &str,
        #[case] phone: &str,
    ) {
        let result = input(full_name, email, phone).validate();
        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }
}
