//! Live-page-context capture logic.
//!
//! Everything here operates on a [`dom::DomNode`] snapshot of the
//! rendered tree handed over by the browser host. The engines are
//! pure and synchronous: fingerprinting identifies SPA states that
//! share a URL, loading detection classifies in-flight indicators, and
//! the transition recorder turns raw navigation events into storable
//! transition drafts.

pub mod dom;
pub mod fingerprint;
pub mod loading;
pub mod transition;
