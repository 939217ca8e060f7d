//! Site-content repository for public copy key/value storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::site_content;

/// Site-content repository.
///
/// Content is a flat key/value map of rendered site copy; writers replace
/// whole values, readers get the full map in one query.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentRepository {
    /// Creates a new content repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Fetches all content as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn as_map(&self) -> Result<BTreeMap<String, String>, DbErr> {
        let rows = site_content::Entity::find().all(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
    }

    /// Fetches one content value by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, DbErr> {
        let row = site_content::Entity::find()
            .filter(site_content::Column::Key.eq(key))
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(|r| r.value))
    }

    /// Upserts a batch of content values; existing keys are overwritten,
    /// unknown keys are created, keys absent from the batch are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any database write fails.
    pub async fn upsert_many(&self, updates: &BTreeMap<String, String>) -> Result<(), DbErr> {
        for (key, value) in updates {
            self.upsert(key, value).await?;
        }
        Ok(())
    }

    /// Upserts a single content value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<(), DbErr> {
        let row = site_content::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            content_type: Set("text".to_string()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        site_content::Entity::insert(row)
            .on_conflict(
                OnConflict::column(site_content::Column::Key)
                    .update_columns([
                        site_content::Column::Value,
                        site_content::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }
}
