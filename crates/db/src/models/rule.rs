//! Obfuscation rule entity model and DTOs.

use demoforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `obfuscation_rules` table.
///
/// `sort_order` is the explicit application order; the engine runs
/// rules ascending and each rule's output feeds the next.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObfuscationRule {
    pub id: DbId,
    pub project_id: DbId,
    pub search_term: String,
    pub replace_term: String,
    pub is_regex: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ObfuscationRule {
    /// View of this row as an engine rule.
    pub fn as_engine_rule(&self) -> demoforge_core::obfuscation::Rule {
        demoforge_core::obfuscation::Rule {
            search_term: self.search_term.clone(),
            replace_term: self.replace_term.clone(),
            is_regex: self.is_regex,
            is_active: self.is_active,
        }
    }
}

/// DTO for creating a new rule.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRule {
    pub project_id: DbId,
    pub search_term: String,
    pub replace_term: String,
    pub is_regex: bool,
    /// Defaults to active.
    pub is_active: Option<bool>,
    /// Defaults to the end of the current order.
    pub sort_order: Option<i32>,
}
