//! Project entity model and DTOs.

use demoforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `subdomain` is unique across projects and selects the project when
/// a demo request comes in. `active_version_id` points at the single
/// version currently served (at most one per project).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub subdomain: String,
    pub tool_name: String,
    pub active_version_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub subdomain: String,
    pub tool_name: String,
}
