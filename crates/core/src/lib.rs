//! Demoforge core domain logic.
//!
//! Pure, synchronous building blocks shared by the capture tooling and
//! the demo serving API: text obfuscation, link rewriting, synthetic
//! URL slugs, and page parent-chain validation. No I/O lives here.

pub mod error;
pub mod link_rewrite;
pub mod obfuscation;
pub mod page_tree;
pub mod slug;
pub mod types;
