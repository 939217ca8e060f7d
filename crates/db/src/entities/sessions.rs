//! `SeaORM` Entity for the sessions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One server-held login session.
///
/// Only the SHA-256 hash of the opaque token is stored; the token itself
/// exists nowhere at rest.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Session ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning identity.
    pub user_id: Uuid,
    /// SHA-256 hash of the bearer token, hex-encoded.
    pub token_hash: String,
    /// Hard expiry; fixed at creation, never extended.
    pub expires_at: DateTimeWithTimeZone,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
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
