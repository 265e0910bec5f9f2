//! Repository for the `obfuscation_rules` table.

use demoforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::rule::{CreateRule, ObfuscationRule};

const COLUMNS: &str = "id, project_id, search_term, replace_term, is_regex, is_active, \
                       sort_order, created_at, updated_at";

/// Provides CRUD operations for obfuscation rules.
pub struct ObfuscationRuleRepo;

impl ObfuscationRuleRepo {
    /// Insert a new rule, returning the created row.
    ///
    /// When `sort_order` is omitted the rule is appended after the
    /// project's existing rules.
    pub async fn create(pool: &PgPool, input: &CreateRule) -> Result<ObfuscationRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO obfuscation_rules
                 (project_id, search_term, replace_term, is_regex, is_active, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE),
                     COALESCE($6, (SELECT COALESCE(MAX(sort_order) + 1, 0)
                                   FROM obfuscation_rules WHERE project_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ObfuscationRule>(&query)
            .bind(input.project_id)
            .bind(&input.search_term)
            .bind(&input.replace_term)
            .bind(input.is_regex)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List a project's active rules in application order.
    pub async fn list_active(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ObfuscationRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM obfuscation_rules
             WHERE project_id = $1 AND is_active
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ObfuscationRule>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List all of a project's rules, active or not, in application
    /// order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ObfuscationRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM obfuscation_rules
             WHERE project_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ObfuscationRule>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a rule by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM obfuscation_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
