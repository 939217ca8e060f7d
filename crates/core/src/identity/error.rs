//! Identity domain errors.

use thiserror::Error;

/// Errors raised by identity rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Required field missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown role name.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The stored NIN is verified and the update would change it.
    #[error("NIN is verified and cannot be changed")]
    NinLocked,

    /// The candidate NIN is already held by a different identity.
    #[error("NIN is already linked to another identity")]
    NinConflict,
}
