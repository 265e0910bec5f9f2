use demoforge_core::error::CoreError;

/// Error type for repository operations that enforce domain
/// invariants on top of plain SQL (parent-chain validation, capture
/// strategy immutability).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error(transparent)]
    Domain(#[from] CoreError),
}
