//! The one-way NIN verification gate.
//!
//! A NIN moves through exactly one verification: once an admin marks it
//! verified it is immutable. Any NIN change (before verification) resets
//! the flag, so a changed number always requires fresh admin review.

use super::error::IdentityError;

/// Outcome of evaluating a NIN update against the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NinChange {
    /// The candidate equals the stored NIN; nothing to write.
    Unchanged,
    /// Store the candidate and reset the verified flag to false.
    Store(String),
}

/// Evaluates a self-service NIN update.
///
/// * `stored` / `verified` - the identity's current NIN state.
/// * `candidate` - the NIN supplied in the update.
/// * `held_by_other` - whether any *other* identity (verified or not)
///   already holds the candidate.
///
/// # Errors
///
/// * `IdentityError::NinLocked` if the stored NIN is verified and differs
///   from the candidate.
/// * `IdentityError::NinConflict` if another identity holds the candidate.
/// * `IdentityError::Validation` if the candidate is empty.
pub fn evaluate_nin_change(
    stored: Option<&str>,
    verified: bool,
    candidate: &str,
    held_by_other: bool,
) -> Result<NinChange, IdentityError> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err(IdentityError::Validation("nin must not be empty".into()));
    }

    if stored == Some(candidate) {
        // Re-submitting the same NIN is a no-op either way; in particular
        // it must not reset an already-verified flag.
        return Ok(NinChange::Unchanged);
    }

    if verified {
        return Err(IdentityError::NinLocked);
    }

    if held_by_other {
        return Err(IdentityError::NinConflict);
    }

    Ok(NinChange::Store(candidate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_nin_is_stored() {
        let change = evaluate_nin_change(None, false, "12345678901", false).unwrap();
        assert_eq!(change, NinChange::Store("12345678901".to_string()));
    }

    #[test]
    fn test_verified_nin_is_locked() {
        let result = evaluate_nin_change(Some("11111111111"), true, "22222222222", false);
        assert_eq!(result, Err(IdentityError::NinLocked));
    }

    #[test]
    fn test_resubmitting_verified_nin_is_noop() {
        let change = evaluate_nin_change(Some("11111111111"), true, "11111111111", false).unwrap();
        assert_eq!(change, NinChange::Unchanged);
    }

    #[test]
    fn test_nin_held_by_other_identity_conflicts() {
        let result = evaluate_nin_change(None, false, "33333333333", true);
        assert_eq!(result, Err(IdentityError::NinConflict));

        // An unverified stored NIN can still collide on change.
        let result = evaluate_nin_change(Some("11111111111"), false, "33333333333", true);
        assert_eq!(result, Err(IdentityError::NinConflict));
    }

    #[test]
    fn test_unverified_nin_can_change() {
        let change =
            evaluate_nin_change(Some("11111111111"), false, "22222222222", false).unwrap();
        assert_eq!(change, NinChange::Store("22222222222".to_string()));
    }

    #[test]
    fn test_empty_candidate_rejected() {
        let result = evaluate_nin_change(None, false, "  ", false);
        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }

    #[test]
    fn test_candidate_is_trimmed() {
        let change = evaluate_nin_change(None, false, " 12345678901 ", false).unwrap();
        assert_eq!(change, NinChange::Store("12345678901".to_string()));
    }
}
