//! Repository for the `page_transitions` table.
//!
//! Transitions are write-once: there is no update operation. They are
//! removed individually or by the version-level cascade.

use demoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::transition::{CreateTransition, PageTransition};

const COLUMNS: &str = "id, version_id, source_page_id, target_page_id, trigger_type, \
                       trigger_selector, trigger_text, loading_time_ms, had_loading_indicator, \
                       loading_indicator_type, capture_mode, created_at";

/// Provides insert/list/delete operations for page transitions.
pub struct TransitionRepo;

impl TransitionRepo {
    /// Insert a new transition, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransition,
    ) -> Result<PageTransition, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_transitions
                 (version_id, source_page_id, target_page_id, trigger_type, trigger_selector,
                  trigger_text, loading_time_ms, had_loading_indicator, loading_indicator_type,
                  capture_mode)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'manual'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageTransition>(&query)
            .bind(input.version_id)
            .bind(input.source_page_id)
            .bind(input.target_page_id)
            .bind(&input.trigger_type)
            .bind(&input.trigger_selector)
            .bind(&input.trigger_text)
            .bind(input.loading_time_ms)
            .bind(input.had_loading_indicator)
            .bind(&input.loading_indicator_type)
            .bind(&input.capture_mode)
            .fetch_one(pool)
            .await
    }

    /// List a version's transitions, oldest first.
    pub async fn list_by_version(
        pool: &PgPool,
        version_id: DbId,
    ) -> Result<Vec<PageTransition>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_transitions WHERE version_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, PageTransition>(&query)
            .bind(version_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a transition by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_transitions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
