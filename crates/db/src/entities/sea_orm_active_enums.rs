//! Postgres enum mappings.
//!
//! Each database enum has a matching domain enum in `meridian-core`; the
//! `From` impls keep the two in lockstep so repositories never compare
//! raw strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::application::{ApplicationKind, ApplicationStatus};
use meridian_core::identity::Role;

/// `user_role` database enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Ordinary registered user.
    #[sea_orm(string_value = "user")]
    User,
    /// Administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// `application_type` database enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "application_type")]
pub enum ApplicationType {
    /// Loan request.
    #[sea_orm(string_value = "loan")]
    Loan,
    /// Investment request.
    #[sea_orm(string_value = "investment")]
    Investment,
    /// Forex-education request.
    #[sea_orm(string_value = "forex")]
    Forex,
}

/// `application_status` database enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "application_status")]
pub enum ApplicationStatusDb {
    /// Awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; terminal.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected; terminal.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Admin => Self::Admin,
        }
    }
}

impl From<&UserRole> for Role {
    fn from(role: &UserRole) -> Self {
        match role {
            UserRole::User => Self::User,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<ApplicationKind> for ApplicationType {
    fn from(kind: ApplicationKind) -> Self {
        match kind {
            ApplicationKind::Loan => Self::Loan,
            ApplicationKind::Investment => Self::Investment,
            ApplicationKind::Forex => Self::Forex,
        }
    }
}

impl From<&ApplicationType> for ApplicationKind {
    fn from(kind: &ApplicationType) -> Self {
        match kind {
            ApplicationType::Loan => Self::Loan,
            ApplicationType::Investment => Self::Investment,
            ApplicationType::Forex => Self::Forex,
        }
    }
}

impl From<ApplicationStatus> for ApplicationStatusDb {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending => Self::Pending,
            ApplicationStatus::Approved => Self::Approved,
            ApplicationStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<&ApplicationStatusDb> for ApplicationStatus {
    fn from(status: &ApplicationStatusDb) -> Self {
        match status {
            ApplicationStatusDb::Pending => Self::Pending,
            ApplicationStatusDb::Approved => Self::Approved,
            ApplicationStatusDb::Rejected => Self::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::from(&UserRole::from(role)), role);
        }
    }

    #[test]
    fn test_kind_round_trips() {
        for kind in [
            ApplicationKind::Loan,
            ApplicationKind::Investment,
            ApplicationKind::Forex,
        ] {
            assert_eq!(ApplicationKind::from(&ApplicationType::from(kind)), kind);
        }
    }

    #[test]
    fn test_status_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(
                ApplicationStatus::from(&ApplicationStatusDb::from(status)),
                status
            );
        }
    }
}
