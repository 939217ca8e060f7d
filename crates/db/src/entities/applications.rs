//! `SeaORM` Entity for the applications table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ApplicationStatusDb, ApplicationType};

/// One submitted service request.
///
/// Applicant contact fields are duplicated from the identity at
/// submission time and never re-derived; `user_id` is nullable because
/// unauthenticated submissions are accepted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    /// Application ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning identity, when the submitter was authenticated.
    pub user_id: Option<Uuid>,
    /// Applicant full name as submitted.
    pub full_name: String,
    /// Applicant email as submitted.
    pub email: String,
    /// Applicant phone as submitted.
    pub phone: Option<String>,
    /// Application kind.
    pub application_type: ApplicationType,
    /// Lifecycle status.
    pub status: ApplicationStatusDb,
    /// Type-tagged details payload, stored opaquely.
    pub details: Json,
    /// Submission timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Approval timestamp; set only on transition to Approved.
    pub approved_at: Option<DateTimeWithTimeZone>,
    /// Admin who decided the application.
    pub decided_by: Option<Uuid>,
    /// Last modification timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
