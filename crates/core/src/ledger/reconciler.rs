//! The single rule for computing an identity's outstanding-loan figure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Snapshot of one approved Loan application, as needed by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedLoan {
    /// Loan amount from the application details; zero when absent.
    pub amount: Decimal,
    /// Approval timestamp; may be missing on legacy rows.
    pub approved_at: Option<DateTime<Utc>>,
    /// Submission timestamp; tie-break and fallback ordering key.
    pub created_at: DateTime<Utc>,
}

impl ApprovedLoan {
    /// Effective ordering key: approval time, falling back to creation
    /// time when the approval stamp is missing.
    fn effective_time(&self) -> DateTime<Utc> {
        self.approved_at.unwrap_or(self.created_at)
    }
}

/// Computes the outstanding-loan figure from an identity's approved
/// Loan applications.
///
/// The figure is the amount of the most recently approved loan, or zero
/// when none exists. "Most recent" orders by approval timestamp
/// descending, with creation timestamp breaking ties and standing in for
/// missing approval stamps. Pure and side-effect-free, so callers may
/// re-derive it on every read without drift.
#[must_use]
pub fn outstanding_loan_amount(approved_loans: &[ApprovedLoan]) -> Decimal {
    approved_loans
        .iter()
        .max_by_key(|loan| (loan.effective_time(), loan.created_at))
        .map_or(Decimal::ZERO, |loan| loan.amount.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn loan(amount: Decimal, approved: Option<i64>, created: i64) -> ApprovedLoan {
        ApprovedLoan {
            amount,
            approved_at: approved.map(at),
            created_at: at(created),
        }
    }

    #[test]
    fn test_no_loans_means_zero() {
        assert_eq!(outstanding_loan_amount(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_single_approved_loan() {
        let loans = vec![loan(dec!(50000), Some(100), 0)];
        assert_eq!(outstanding_loan_amount(&loans), dec!(50000));
    }

    #[test]
    fn test_most_recent_approval_wins_not_the_sum() {
        let loans = vec![
            loan(dec!(50000), Some(100), 0),
            loan(dec!(20000), Some(200), 50),
        ];
        assert_eq!(outstanding_loan_amount(&loans), dec!(20000));
    }

    #[test]
    fn test_missing_approval_stamp_falls_back_to_creation() {
        let loans = vec![
            loan(dec!(50000), Some(100), 0),
            // Approved later (by creation time) but never stamped.
            loan(dec!(30000), None, 150),
        ];
        assert_eq!(outstanding_loan_amount(&loans), dec!(30000));
    }

    #[test]
    fn test_creation_time_breaks_approval_ties() {
        let loans = vec![
            loan(dec!(10000), Some(100), 10),
            loan(dec!(25000), Some(100), 20),
        ];
        assert_eq!(outstanding_loan_amount(&loans), dec!(25000));
    }

    #[test]
    fn test_figure_is_never_negative() {
        let loans = vec![loan(dec!(-500), Some(100), 0)];
        assert_eq!(outstanding_loan_amount(&loans), Decimal::ZERO);
    }

    #[test]
    fn test_recomputation_is_stable() {
        let loans = vec![
            loan(dec!(50000), Some(100), 0),
            loan(dec!(20000), Some(200), 50),
        ];
        let first = outstanding_loan_amount(&loans);
        let second = outstanding_loan_amount(&loans);
        assert_eq!(first, second);
    }
}
