//! The review state machine.
//!
//! Pure transition logic: given a current status and an admin action,
//! either produce the transition to apply or refuse. The storage layer is
//! responsible for applying the transition conditionally (only while the
//! row is still Pending) so that concurrent reviews cannot both win.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::ApplicationError;
use super::types::ApplicationStatus;

/// An admin review action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Approve the application.
    Approve,
    /// Reject the application.
    Reject,
}

impl ReviewAction {
    /// Parses an action from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::UnknownAction` for anything but
    /// approve/reject.
    pub fn parse(s: &str) -> Result<Self, ApplicationError> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(ApplicationError::UnknownAction(other.to_string())),
        }
    }
}

/// A validated transition ready to be applied conditionally by storage.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The terminal status to write.
    pub new_status: ApplicationStatus,
    /// Approval timestamp; `Some` only for approvals.
    pub approved_at: Option<DateTime<Utc>>,
    /// The reviewing admin.
    pub decided_by: Uuid,
}

/// Stateless engine for application review transitions.
pub struct LifecycleEngine;

impl LifecycleEngine {
    /// Validates a review action against the current status.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::AlreadyFinal` if the application has
    /// left Pending - terminal states admit no further transitions, and a
    /// repeat approve must fail rather than re-apply side effects.
    pub fn review(
        current: ApplicationStatus,
        action: ReviewAction,
        decided_by: Uuid,
    ) -> Result<Transition, ApplicationError> {
        if current.is_final() {
            return Err(ApplicationError::AlreadyFinal(current));
        }

        let transition = match action {
            ReviewAction::Approve => Transition {
                new_status: ApplicationStatus::Approved,
                approved_at: Some(Utc::now()),
                decided_by,
            },
            ReviewAction::Reject => Transition {
                new_status: ApplicationStatus::Rejected,
                approved_at: None,
                decided_by,
            },
        };

        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_approve_from_pending() {
        let t = LifecycleEngine::review(ApplicationStatus::Pending, ReviewAction::Approve, admin())
            .unwrap();
        assert_eq!(t.new_status, ApplicationStatus::Approved);
        assert!(t.approved_at.is_some());
    }

    #[test]
    fn test_reject_from_pending() {
        let t = LifecycleEngine::review(ApplicationStatus::Pending, ReviewAction::Reject, admin())
            .unwrap();
        assert_eq!(t.new_status, ApplicationStatus::Rejected);
        assert!(t.approved_at.is_none());
    }

    #[test]
    fn test_terminal_states_refuse_transitions() {
        for current in [ApplicationStatus::Approved, ApplicationStatus::Rejected] {
            for action in [ReviewAction::Approve, ReviewAction::Reject] {
                let result = LifecycleEngine::review(current, action, admin());
                assert_eq!(result.unwrap_err(), ApplicationError::AlreadyFinal(current));
            }
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(ReviewAction::parse("approve").unwrap(), ReviewAction::Approve);
        assert_eq!(ReviewAction::parse("REJECT").unwrap(), ReviewAction::Reject);
        assert!(matches!(
            ReviewAction::parse("escalate"),
            Err(ApplicationError::UnknownAction(_))
        ));
    }
}
