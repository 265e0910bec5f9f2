//! Version entity model and DTOs.

use demoforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Capture strategy storage values.
pub const STRATEGY_URL_BASED: &str = "url_based";
pub const STRATEGY_STATE_BASED: &str = "state_based";

/// A version row from the `versions` table.
///
/// The capture strategy is immutable once pages exist under the
/// version; `VersionRepo::set_capture_strategy` enforces this.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub project_id: DbId,
    pub capture_strategy: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersion {
    pub project_id: DbId,
    /// Defaults to `url_based` when omitted.
    pub capture_strategy: Option<String>,
}
