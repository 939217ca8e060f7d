//! Service-request (application) domain logic.
//!
//! An application is a Loan, Investment, or Forex request submitted for
//! admin review. The lifecycle is a one-way state machine:
//! Pending → Approved or Pending → Rejected, with no exit from either
//! terminal state.

mod details;
mod error;
mod lifecycle;
mod types;

pub use details::{loan_amount, loan_duration, set_loan_amount, validate_details};
pub use error::ApplicationError;
pub use lifecycle::{LifecycleEngine, ReviewAction, Transition};
pub use types::{ApplicationKind, ApplicationStatus, Submission};
