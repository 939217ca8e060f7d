//! Application domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ApplicationError;

/// The three recognized service-request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationKind {
    /// Loan request: amount, duration, purpose, NIN, guarantor.
    Loan,
    /// Investment request: amount, duration, next-of-kin.
    Investment,
    /// Forex-education request: experience level, goals, message.
    Forex,
}

impl ApplicationKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loan => "Loan",
            Self::Investment => "Investment",
            Self::Forex => "Forex",
        }
    }

    /// Parses a kind from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::UnknownKind` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, ApplicationError> {
        match s.to_lowercase().as_str() {
            "loan" => Ok(Self::Loan),
            "investment" => Ok(Self::Investment),
            "forex" => Ok(Self::Forex),
            other => Err(ApplicationError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ApplicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application lifecycle status.
///
/// Valid transitions: Pending → Approved, Pending → Rejected. Approved
/// and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting admin review.
    Pending,
    /// Approved; terminal.
    Approved,
    /// Rejected; terminal.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Parses a status from a string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true for terminal states.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated submission ready for persistence.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Applicant full name, captured at submission time.
    pub full_name: String,
    /// Applicant email, captured at submission time.
    pub email: String,
    /// Applicant phone, captured at submission time.
    pub phone: Option<String>,
    /// Application kind.
    pub kind: ApplicationKind,
    /// Loosely validated details payload.
    pub details: serde_json::Value,
}

impl Submission {
    /// Validates raw submission input.
    ///
    /// Name, email, and a recognized type are required; details are
    /// checked loosely per kind (see [`super::validate_details`]) and
    /// unrecognized extra fields are tolerated.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` or
    /// `ApplicationError::UnknownKind`.
    pub fn validate(
        full_name: &str,
        email: &str,
        phone: Option<&str>,
        kind: &str,
        details: serde_json::Value,
    ) -> Result<Self, ApplicationError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ApplicationError::Validation("full_name is required".into()));
        }

        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApplicationError::Validation("email is required".into()));
        }

        let kind = ApplicationKind::parse(kind)?;
        super::validate_details(kind, &details)?;

        Ok(Self {
            full_name: full_name.to_string(),
            email,
            phone: phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            kind,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(ApplicationKind::parse("loan").unwrap(), ApplicationKind::Loan);
        assert_eq!(
            ApplicationKind::parse("INVESTMENT").unwrap(),
            ApplicationKind::Investment
        );
        assert_eq!(
            ApplicationKind::parse("Forex").unwrap(),
            ApplicationKind::Forex
        );
        assert!(matches!(
            ApplicationKind::parse("mortgage"),
            Err(ApplicationError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!ApplicationStatus::Pending.is_final());
        assert!(ApplicationStatus::Approved.is_final());
        assert!(ApplicationStatus::Rejected.is_final());
    }

    #[test]
    fn test_status_parse_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("archived"), None);
    }

    #[test]
    fn test_submission_requires_name_email_and_kind() {
        let ok = Submission::validate(
            "Jane Doe",
            "Jane@X.com",
            Some("555-0100"),
            "Loan",
            json!({"amount": 50000, "duration": "12 months"}),
        )
        .unwrap();
        assert_eq!(ok.email, "jane@x.com");
        assert_eq!(ok.kind, ApplicationKind::Loan);

        assert!(Submission::validate("", "jane@x.com", None, "Loan", json!({})).is_err());
        assert!(Submission::validate("Jane", "", None, "Loan", json!({})).is_err());
        assert!(matches!(
            Submission::validate("Jane", "jane@x.com", None, "crypto", json!({})),
            Err(ApplicationError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_submission_blank_phone_becomes_none() {
        let sub = Submission::validate(
            "Jane Doe",
            "jane@x.com",
            Some("  "),
            "Forex",
            json!({"experience_level": "beginner"}),
        )
        .unwrap();
        assert_eq!(sub.phone, None);
    }
}
