//! Account-ledger derivation.
//!
//! The outstanding-loan figure on an identity is derived state: it is
//! recomputed from approval history on every read and after every Loan
//! transition, never stored as an independently mutable field.

mod reconciler;

pub use reconciler::{ApprovedLoan, outstanding_loan_amount};
