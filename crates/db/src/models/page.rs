//! Page entity model and DTOs.

use demoforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Page type storage values.
pub const PAGE_TYPE_PAGE: &str = "page";
pub const PAGE_TYPE_STATE: &str = "state";

/// A page row from the `pages` table.
///
/// URL-based pages (`page_type = 'page'`) are addressed by `url_path`.
/// State pages (`page_type = 'state'`) carry the fingerprint of the
/// captured DOM state, a `synthetic_url` they are served under, a
/// `parent_page_id` back-reference to the URL-based page they were
/// reached from, and a `state_index` ordering siblings under that
/// parent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub version_id: DbId,
    pub page_type: String,
    pub url_source: String,
    pub url_path: String,
    pub parent_page_id: Option<DbId>,
    pub fingerprint: Option<String>,
    pub synthetic_url: Option<String>,
    pub content: String,
    pub title: Option<String>,
    pub captured_at: Option<Timestamp>,
    pub load_time_ms: Option<i32>,
    pub state_index: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub version_id: DbId,
    /// Defaults to `page` when omitted.
    pub page_type: Option<String>,
    pub url_source: String,
    pub url_path: String,
    pub parent_page_id: Option<DbId>,
    pub fingerprint: Option<String>,
    pub synthetic_url: Option<String>,
    pub content: String,
    pub title: Option<String>,
    pub captured_at: Option<Timestamp>,
    pub load_time_ms: Option<i32>,
    /// Defaults to the next free index under the same parent.
    pub state_index: Option<i32>,
}
