//! Handler for the public demo route.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{self, HeaderValue};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::demo::pipeline::serve_demo_page;
use crate::locale::Lang;
use crate::state::AppState;

/// Diagnostic header naming the serving project.
const HEADER_PROJECT: &str = "x-demo-project";
/// Diagnostic header naming the served page path.
const HEADER_PAGE: &str = "x-demo-page";

/// GET /demo/{subdomain}/{*path}
pub async fn serve(
    State(state): State<AppState>,
    Path((subdomain, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let lang = Lang::negotiate(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );

    match serve_demo_page(&state.pool, &state.config, &subdomain, &path).await {
        Ok(served) => {
            let mut response = html_response(StatusCode::OK, served.html);
            set_diagnostic_header(&mut response, HEADER_PROJECT, &served.project.name);
            set_diagnostic_header(&mut response, HEADER_PAGE, &served.page.url_path);
            response
        }
        Err(err) => err.into_html_response(lang),
    }
}

/// Build an HTML response with caching explicitly disabled.
pub fn html_response(status: StatusCode, body: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(Body::from(body))
        .expect("static header set is valid")
}

/// Attach a diagnostic header with CR, LF, and other control
/// characters stripped so stored titles cannot inject headers.
fn set_diagnostic_header(response: &mut Response, name: &'static str, value: &str) {
    let sanitized: String = value.chars().filter(|c| !c.is_control()).collect();
    if let Ok(header_value) = HeaderValue::from_str(&sanitized) {
        response.headers_mut().insert(name, header_value);
    }
}
