//! Application domain errors.

use thiserror::Error;

use super::types::ApplicationStatus;

/// Errors raised by application rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// Required field missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Type is not one of Loan, Investment, Forex.
    #[error("unknown application type: {0}")]
    UnknownKind(String),

    /// Action is not approve or reject.
    #[error("unknown review action: {0}")]
    UnknownAction(String),

    /// Transition attempted on a non-Pending application. Terminal states
    /// are terminal; a repeat approve must surface here, never silently
    /// re-apply its side effects.
    #[error("application is already {0}")]
    AlreadyFinal(ApplicationStatus),
}
