//! Repository for the `pages` table.

use std::collections::HashMap;

use demoforge_core::error::CoreError;
use demoforge_core::page_tree::{self, NodeKind, PageNode};
use demoforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::page::{CreatePage, Page, PAGE_TYPE_PAGE, PAGE_TYPE_STATE};

const COLUMNS: &str = "id, version_id, page_type, url_source, url_path, parent_page_id, \
                       fingerprint, synthetic_url, content, title, captured_at, load_time_ms, \
                       state_index, created_at";

/// Provides lookup and capture-ingest operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page, returning the created row.
    ///
    /// State pages must name a parent whose chain reaches a
    /// URL-based page within the bounded depth; violating inserts are
    /// rejected with [`CoreError::Validation`] before touching
    /// storage. When `state_index` is omitted the page is appended
    /// after its siblings.
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, StoreError> {
        let page_type = input.page_type.as_deref().unwrap_or(PAGE_TYPE_PAGE);

        match (page_type, input.parent_page_id) {
            (PAGE_TYPE_STATE, Some(parent_id)) => {
                let forest = Self::load_forest(pool, input.version_id).await?;
                page_tree::validate_parent_chain(&forest, parent_id)?;
            }
            (PAGE_TYPE_STATE, None) => {
                return Err(CoreError::Validation(
                    "state pages must reference a parent page".to_string(),
                )
                .into());
            }
            (PAGE_TYPE_PAGE, Some(_)) => {
                return Err(CoreError::Validation(
                    "url-based pages cannot have a parent page".to_string(),
                )
                .into());
            }
            _ => {}
        }

        let query = format!(
            "INSERT INTO pages (version_id, page_type, url_source, url_path, parent_page_id,
                                fingerprint, synthetic_url, content, title, captured_at,
                                load_time_ms, state_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                     COALESCE($12, (SELECT COALESCE(MAX(state_index) + 1, 0)
                                    FROM pages
                                    WHERE version_id = $1
                                      AND parent_page_id IS NOT DISTINCT FROM $5)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(input.version_id)
            .bind(page_type)
            .bind(&input.url_source)
            .bind(&input.url_path)
            .bind(input.parent_page_id)
            .bind(&input.fingerprint)
            .bind(&input.synthetic_url)
            .bind(&input.content)
            .bind(&input.title)
            .bind(input.captured_at)
            .bind(input.load_time_ms)
            .bind(input.state_index)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from)
    }

    /// Find a page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the page a demo request path addresses within a
    /// version: either a URL-based page's `url_path` or a state
    /// page's synthetic URL.
    pub async fn find_by_path(
        pool: &PgPool,
        version_id: DbId,
        request_path: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE version_id = $1 AND (url_path = $2 OR synthetic_url = $2)
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(version_id)
            .bind(request_path)
            .fetch_optional(pool)
            .await
    }

    /// List every page of a version: URL-based pages first, then
    /// state pages grouped under their parent in `state_index` order.
    pub async fn list_by_version(
        pool: &PgPool,
        version_id: DbId,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE version_id = $1
             ORDER BY (page_type = '{PAGE_TYPE_STATE}'), parent_page_id NULLS FIRST, state_index, id"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(version_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a page by ID. Child state pages cascade with it.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the version's pages as an id-indexed forest for
    /// parent-chain validation.
    async fn load_forest(
        pool: &PgPool,
        version_id: DbId,
    ) -> Result<HashMap<DbId, PageNode>, sqlx::Error> {
        let rows: Vec<(DbId, String, Option<DbId>)> =
            sqlx::query_as("SELECT id, page_type, parent_page_id FROM pages WHERE version_id = $1")
                .bind(version_id)
                .fetch_all(pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, page_type, parent_id)| {
                let kind = if page_type == PAGE_TYPE_STATE {
                    NodeKind::State
                } else {
                    NodeKind::Page
                };
                (id, PageNode { kind, parent_id })
            })
            .collect())
    }
}
