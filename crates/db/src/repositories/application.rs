//! Application repository for service-request database operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use meridian_core::application::{
    ApplicationError as DomainError, ApplicationKind, ApplicationStatus, LifecycleEngine,
    ReviewAction, Submission, loan_amount, set_loan_amount,
};
use meridian_core::ledger::{ApprovedLoan, outstanding_loan_amount};

use crate::entities::{
    applications,
    sea_orm_active_enums::{ApplicationStatusDb, ApplicationType},
};

/// Error types for application operations.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    /// Application not found.
    #[error("Application not found: {0}")]
    NotFound(Uuid),

    /// The application already reached a terminal status.
    #[error("Application is already {0}")]
    AlreadyFinal(String),

    /// Validation failure in submitted fields.
    #[error("{0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::UnknownKind(kind) => {
                Self::Validation(format!("unknown application type '{kind}'"))
            }
            DomainError::UnknownAction(action) => {
                Self::Validation(format!("unknown action '{action}'"))
            }
            DomainError::AlreadyFinal(status) => Self::AlreadyFinal(status.as_str().to_string()),
        }
    }
}

/// Application repository for CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    db: Arc<DatabaseConnection>,
}

impl ApplicationRepository {
    /// Creates a new application repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Stores a validated submission as a Pending application.
    ///
    /// Applicant contact fields are snapshotted from the submission and
    /// never re-derived from the owning identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        submission: &Submission,
        owner_id: Option<Uuid>,
    ) -> Result<applications::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let application = applications::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            full_name: Set(submission.full_name.clone()),
            email: Set(submission.email.clone()),
            phone: Set(submission.phone.clone()),
            application_type: Set(submission.kind.into()),
            status: Set(ApplicationStatusDb::Pending),
            details: Set(submission.details.clone()),
            created_at: Set(now),
            approved_at: Set(None),
            decided_by: Set(None),
            updated_at: Set(now),
        };

        application.insert(self.db.as_ref()).await
    }

    /// Finds an application by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<applications::Model>, DbErr> {
        applications::Entity::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Lists all applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<applications::Model>, DbErr> {
        applications::Entity::find()
            .order_by_desc(applications::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists one identity's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<applications::Model>, DbErr> {
        applications::Entity::find()
            .filter(applications::Column::UserId.eq(user_id))
            .order_by_desc(applications::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Applies a review decision with compare-and-set semantics.
    ///
    /// The status flip is a single conditional update filtered on
    /// `status = 'pending'`, so two concurrent reviewers cannot both win:
    /// the loser's update matches zero rows and reports the application as
    /// already final. On loan approval an `amount_override`, when given,
    /// replaces the amount inside the details payload before the flip, so
    /// the ledger reconciler only ever sees the decided figure.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown ID,
    /// [`ApplicationError::AlreadyFinal`] when the application has left
    /// Pending, or a database error.
    pub async fn transition(
        &self,
        id: Uuid,
        action: ReviewAction,
        decided_by: Uuid,
        amount_override: Option<Decimal>,
    ) -> Result<applications::Model, ApplicationError> {
        let application = self
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound(id))?;

        let current = ApplicationStatus::from(&application.status);
        let transition = LifecycleEngine::review(current, action, decided_by)?;

        let mut details = application.details.clone();
        if ApplicationKind::from(&application.application_type) == ApplicationKind::Loan
            && transition.new_status == ApplicationStatus::Approved
            && let Some(amount) = amount_override
        {
            set_loan_amount(&mut details, amount);
        }

        let result = applications::Entity::update_many()
            .col_expr(
                applications::Column::Status,
                sea_orm::sea_query::Expr::value(ApplicationStatusDb::from(transition.new_status)),
            )
            .col_expr(
                applications::Column::ApprovedAt,
                sea_orm::sea_query::Expr::value(transition.approved_at),
            )
            .col_expr(
                applications::Column::DecidedBy,
                sea_orm::sea_query::Expr::value(Some(transition.decided_by)),
            )
            .col_expr(
                applications::Column::Details,
                sea_orm::sea_query::Expr::value(details),
            )
            .col_expr(
                applications::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(applications::Column::Id.eq(id))
            .filter(applications::Column::Status.eq(ApplicationStatusDb::Pending))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            // Lost a concurrent review; report the status that won.
            let status = self
                .find_by_id(id)
                .await?
                .map_or_else(|| "decided".to_string(), |a| {
                    ApplicationStatus::from(&a.status).as_str().to_string()
                });
            return Err(ApplicationError::AlreadyFinal(status));
        }

        self.find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound(id))
    }

    /// Deletes an application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown ID, or a
    /// database error.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApplicationError> {
        let result = applications::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(ApplicationError::NotFound(id));
        }
        Ok(())
    }

    /// Derives an identity's outstanding-loan figure from their approved
    /// Loan applications. Nothing is stored; every caller gets a fresh
    /// computation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn outstanding_loan_for(&self, user_id: Uuid) -> Result<Decimal, DbErr> {
        let loans = self.approved_loans_for(user_id).await?;
        Ok(outstanding_loan_amount(&loans))
    }

    /// Fetches an identity's approved Loan applications as reconciler
    /// input.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn approved_loans_for(&self, user_id: Uuid) -> Result<Vec<ApprovedLoan>, DbErr> {
        let rows = applications::Entity::find()
            .filter(applications::Column::UserId.eq(user_id))
            .filter(applications::Column::ApplicationType.eq(ApplicationType::Loan))
            .filter(applications::Column::Status.eq(ApplicationStatusDb::Approved))
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ApprovedLoan {
                amount: loan_amount(&row.details).unwrap_or(Decimal::ZERO),
                approved_at: row.approved_at.map(Into::into),
                created_at: row.created_at.into(),
            })
            .collect())
    }

    /// Most recently approved Loan application for an identity, if any.
    /// Exposed for the admin user listing, which surfaces loan metadata
    /// next to the derived figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn latest_approved_loan_for(
        &self,
        user_id: Uuid,
    ) -> Result<Option<applications::Model>, DbErr> {
        applications::Entity::find()
            .filter(applications::Column::UserId.eq(user_id))
            .filter(applications::Column::ApplicationType.eq(ApplicationType::Loan))
            .filter(applications::Column::Status.eq(ApplicationStatusDb::Approved))
            .order_by_desc(applications::Column::ApprovedAt)
            .order_by_desc(applications::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn pending_loan(id: Uuid) -> applications::Model {
        let now = chrono::Utc::now().into();
        applications::Model {
            id,
            user_id: Some(Uuid::new_v4()),
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: Some("555-0100".to_string()),
            application_type: ApplicationType::Loan,
            status: ApplicationStatusDb::Pending,
            details: serde_json::json!({"amount": "5000", "duration": "12 months"}),
            created_at: now,
            approved_at: None,
            decided_by: None,
            updated_at: now,
        }
    }

    fn decided(mut application: applications::Model, reviewer: Uuid) -> applications::Model {
        application.status = ApplicationStatusDb::Approved;
        application.approved_at = Some(chrono::Utc::now().into());
        application.decided_by = Some(reviewer);
        application
    }

    #[tokio::test]
    async fn test_review_flips_pending_application() {
        let id = Uuid::new_v4();
        let reviewer = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending_loan(id)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![decided(pending_loan(id), reviewer)]])
            .into_connection();

        let updated = ApplicationRepository::new(Arc::new(db))
            .transition(id, ReviewAction::Approve, reviewer, None)
            .await
            .unwrap();

        assert_eq!(updated.status, ApplicationStatusDb::Approved);
        assert!(updated.approved_at.is_some());
        assert_eq!(updated.decided_by, Some(reviewer));
    }

    #[tokio::test]
    async fn test_losing_concurrent_review_observes_already_final() {
        let id = Uuid::new_v4();
        let reviewer = Uuid::new_v4();
        let rival = Uuid::new_v4();

        // The row reads as Pending, but by the time the conditional update
        // runs another reviewer has won the flip: zero rows match.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending_loan(id)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![decided(pending_loan(id), rival)]])
            .into_connection();

        let err = ApplicationRepository::new(Arc::new(db))
            .transition(id, ReviewAction::Reject, reviewer, None)
            .await
            .unwrap_err();

        eprintln!("DEBUG actual err: {err:?}");
        assert!(matches!(err, ApplicationError::AlreadyFinal(ref status) if status == "approved"));
    }

    #[tokio::test]
    async fn test_unknown_application_is_not_found() {
        let id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<applications::Model>::new()])
            .into_connection();

        let err = ApplicationRepository::new(Arc::new(db))
            .transition(id, ReviewAction::Approve, Uuid::new_v4(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound(found) if found == id));
    }
}
