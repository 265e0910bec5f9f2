//! Demo serving error type.
//!
//! Per-rule and per-link failures are recovered inside the transform
//! components and never surface here; only resolution failures and
//! storage errors reach the HTTP boundary, where they render as
//! localized HTML fragments with no internal detail.

use axum::http::StatusCode;
use axum::response::Response;

use crate::handlers::demo::html_response;
use crate::locale::{self, Lang};

/// Error raised while resolving and assembling a demo page.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Project, active version, or page could not be resolved.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A storage error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DemoError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        DemoError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Render this error as a localized HTML response.
    ///
    /// 404 for resolution failures; anything else logs the cause and
    /// returns a detail-free 500.
    pub fn into_html_response(self, lang: Lang) -> Response {
        match self {
            DemoError::NotFound { entity, key } => {
                tracing::debug!(entity, key = %key, "Demo resolution failed");
                html_response(StatusCode::NOT_FOUND, locale::not_found_page(lang))
            }
            DemoError::Database(err) => {
                tracing::error!(error = %err, "Demo serving failed");
                html_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    locale::internal_error_page(lang),
                )
            }
        }
    }
}
