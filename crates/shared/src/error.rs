//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure surfaced to a caller carries a stable machine-checkable
/// code (`error_code`) plus a human-readable message. Messages must never
/// contain raw passwords or password hashes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An identity with the same email already exists.
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// The NIN is already held by a different identity.
    #[error("This NIN is already linked to another account")]
    NinConflict,

    /// The identity's NIN is verified and cannot be changed.
    #[error("NIN is already verified and cannot be changed")]
    NinLocked,

    /// Bad credentials. Deliberately undifferentiated: callers must not be
    /// able to tell a wrong password from an unknown email.
    #[error("Invalid email or password")]
    AuthFailure,

    /// No valid session.
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Valid session, insufficient role.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transition attempted on an application that is no longer Pending.
    #[error("Application is already {0}")]
    AlreadyFinal(String),

    /// An admin attempted to delete their own identity.
    #[error("You cannot delete your own account")]
    SelfDeletionForbidden,

    /// Storage-layer connectivity failure; the one class callers may retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::DuplicateIdentity(_) | Self::NinConflict => 409,
            Self::NinLocked | Self::AlreadyFinal(_) | Self::SelfDeletionForbidden => 422,
            Self::AuthFailure | Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::StoreUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            Self::NinConflict => "NIN_CONFLICT",
            Self::NinLocked => "NIN_LOCKED",
            Self::AuthFailure => "AUTH_FAILURE",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyFinal(_) => "ALREADY_FINAL",
            Self::SelfDeletionForbidden => "SELF_DELETION_FORBIDDEN",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(
            AppError::DuplicateIdentity(String::new()).status_code(),
            409
        );
        assert_eq!(AppError::NinConflict.status_code(), 409);
        assert_eq!(AppError::NinLocked.status_code(), 422);
        assert_eq!(AppError::AuthFailure.status_code(), 401);
        assert_eq!(AppError::Unauthenticated(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::AlreadyFinal(String::new()).status_code(), 422);
        assert_eq!(AppError::SelfDeletionForbidden.status_code(), 422);
        assert_eq!(AppError::StoreUnavailable(String::new()).status_code(), 503);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::DuplicateIdentity(String::new()).error_code(),
            "DUPLICATE_IDENTITY"
        );
        assert_eq!(AppError::NinConflict.error_code(), "NIN_CONFLICT");
        assert_eq!(AppError::NinLocked.error_code(), "NIN_LOCKED");
        assert_eq!(AppError::AuthFailure.error_code(), "AUTH_FAILURE");
        assert_eq!(
            AppError::Unauthenticated(String::new()).error_code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::AlreadyFinal(String::new()).error_code(),
            "ALREADY_FINAL"
        );
        assert_eq!(
            AppError::SelfDeletionForbidden.error_code(),
            "SELF_DELETION_FORBIDDEN"
        );
        assert_eq!(
            AppError::StoreUnavailable(String::new()).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_auth_failure_is_undifferentiated() {
        // The display string must not hint at which credential was wrong.
        let msg = AppError::AuthFailure.to_string();
        assert_eq!(msg, "Invalid email or password");
        assert!(!msg.to_lowercase().contains("no such"));
        assert!(!msg.to_lowercase().contains("hash"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("application 42".into()).to_string(),
            "Not found: application 42"
        );
        assert_eq!(
            AppError::AlreadyFinal("approved".into()).to_string(),
            "Application is already approved"
        );
        assert_eq!(
            AppError::SelfDeletionForbidden.to_string(),
            "You cannot delete your own account"
        );
    }
}
