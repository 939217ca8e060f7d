//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::UserRole;

/// One registered identity.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Identity ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Email, stored lowercased; unique.
    pub email: String,
    /// Argon2id hash in PHC format. Never serialized out of the db layer.
    pub password_hash: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address; sentinel "Not Provided" when never set.
    pub address: String,
    /// Role.
    pub role: UserRole,
    /// Generated 10-digit account number; unique.
    pub account_number: String,
    /// Account balance.
    pub account_balance: Decimal,
    /// National Identification Number; unique when present.
    pub nin: Option<String>,
    /// Whether an admin has verified the NIN.
    pub nin_verified: bool,
    /// Opaque profile-picture reference.
    pub profile_picture: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last successful login.
    pub last_login: Option<DateTimeWithTimeZone>,
    /// Last modification timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
