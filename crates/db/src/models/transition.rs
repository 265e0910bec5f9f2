//! Page transition entity model and DTOs.

use demoforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `page_transitions` table. Immutable once created;
/// removed individually or by the version-level cascade.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageTransition {
    pub id: DbId,
    pub version_id: DbId,
    pub source_page_id: DbId,
    pub target_page_id: DbId,
    pub trigger_type: String,
    pub trigger_selector: Option<String>,
    pub trigger_text: Option<String>,
    pub loading_time_ms: Option<i32>,
    pub had_loading_indicator: bool,
    pub loading_indicator_type: Option<String>,
    pub capture_mode: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new transition.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransition {
    pub version_id: DbId,
    pub source_page_id: DbId,
    pub target_page_id: DbId,
    pub trigger_type: String,
    pub trigger_selector: Option<String>,
    pub trigger_text: Option<String>,
    pub loading_time_ms: Option<i32>,
    pub had_loading_indicator: bool,
    pub loading_indicator_type: Option<String>,
    /// Defaults to `manual` when omitted.
    pub capture_mode: Option<String>,
}
