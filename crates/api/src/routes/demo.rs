//! Route definitions for the public demo surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::demo;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET /demo/{subdomain}/{*path} -> serve
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/demo/{subdomain}/{*path}", get(demo::serve))
}
