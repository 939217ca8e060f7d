//! `SeaORM` Entity for the site_content table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One keyed block of public site copy.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "site_content")]
pub struct Model {
    /// Content key, e.g. `hero_title`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Rendered value.
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// Value media hint, e.g. `text` or `html`.
    pub content_type: String,
    /// Last modification timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
