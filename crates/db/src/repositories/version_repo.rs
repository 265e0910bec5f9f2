//! Repository for the `versions` table.

use demoforge_core::error::CoreError;
use demoforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::version::{CreateVersion, Version, STRATEGY_URL_BASED};

const COLUMNS: &str = "id, project_id, capture_strategy, status, created_at, updated_at";

/// Provides lookup and lifecycle operations for versions.
pub struct VersionRepo;

impl VersionRepo {
    /// Insert a new version, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVersion) -> Result<Version, sqlx::Error> {
        let query = format!(
            "INSERT INTO versions (project_id, capture_strategy)
             VALUES ($1, COALESCE($2, '{STRATEGY_URL_BASED}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(input.project_id)
            .bind(&input.capture_strategy)
            .fetch_one(pool)
            .await
    }

    /// Find a version by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE id = $1");
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the project's single active version, if one is set.
    pub async fn find_active(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let query = format!(
            "SELECT v.id, v.project_id, v.capture_strategy, v.status, v.created_at, v.updated_at
             FROM versions v
             JOIN projects p ON p.active_version_id = v.id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Change the capture strategy of a version.
    ///
    /// The strategy is immutable once pages exist under the version;
    /// attempts to change it then return [`CoreError::Conflict`].
    pub async fn set_capture_strategy(
        pool: &PgPool,
        id: DbId,
        capture_strategy: &str,
    ) -> Result<Version, StoreError> {
        let page_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE version_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;

        if page_count > 0 {
            return Err(CoreError::Conflict(format!(
                "capture strategy of version {id} is immutable: {page_count} pages exist"
            ))
            .into());
        }

        let query = format!(
            "UPDATE versions SET capture_strategy = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .bind(capture_strategy)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Version",
                    key: id.to_string(),
                }
                .into()
            })
    }

    /// Delete a version by ID. Pages and transitions cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM versions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
