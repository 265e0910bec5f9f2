//! Demo serving pipeline: snapshot lookup, obfuscation, link
//! rewriting, and terminal content injection.

pub mod inject;
pub mod pipeline;
