//! Parent-chain validation for state pages.
//!
//! State pages form an id-indexed forest under URL-based pages via
//! `parent_page_id`. The chain from any state page must reach a
//! `page`-type root within a bounded number of hops; inserts that
//! would create a cycle or an over-deep chain are rejected before they
//! hit storage.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of parent hops a state page may sit below its
/// URL-based root.
pub const MAX_PARENT_DEPTH: usize = 8;

/// Page type discriminant as seen by the forest walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Page,
    State,
}

/// The minimal per-page data the forest walk needs.
#[derive(Debug, Clone, Copy)]
pub struct PageNode {
    pub kind: NodeKind,
    pub parent_id: Option<DbId>,
}

/// Walk the parent chain starting at `parent_id` and verify it
/// terminates at a `page`-type node within [`MAX_PARENT_DEPTH`] hops,
/// without revisiting any ancestor.
///
/// `nodes` must contain every page of the version, keyed by id.
pub fn validate_parent_chain(
    nodes: &HashMap<DbId, PageNode>,
    parent_id: DbId,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    let mut current = parent_id;

    for _ in 0..MAX_PARENT_DEPTH {
        if !seen.insert(current) {
            return Err(CoreError::Validation(format!(
                "parent chain revisits page {current}"
            )));
        }

        let node = nodes.get(&current).ok_or_else(|| {
            CoreError::Validation(format!("parent page {current} does not exist"))
        })?;

        match (node.kind, node.parent_id) {
            (NodeKind::Page, _) => return Ok(()),
            (NodeKind::State, Some(next)) => current = next,
            (NodeKind::State, None) => {
                return Err(CoreError::Validation(format!(
                    "state page {current} has no parent and cannot root a chain"
                )))
            }
        }
    }

    Err(CoreError::Validation(format!(
        "parent chain exceeds {MAX_PARENT_DEPTH} hops"
    )))
}
