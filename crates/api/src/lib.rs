//! Demoforge API server library.
//!
//! Exposes the building blocks (config, state, demo serving pipeline,
//! localized error fragments, routes) so integration tests and the
//! binary entrypoint can both access them.

pub mod config;
pub mod demo;
pub mod error;
pub mod handlers;
pub mod locale;
pub mod routes;
pub mod state;
