//! HTTP-level integration tests for the demo serving pipeline:
//! resolution, obfuscation, link rewriting, injection, headers, and
//! localized error fragments.

mod common;

use axum::http::header;
use axum::http::StatusCode;
use common::{body_string, get, get_with_header};
use sqlx::PgPool;

use demoforge_db::models::page::{CreatePage, PAGE_TYPE_STATE};
use demoforge_db::models::project::{CreateProject, Project};
use demoforge_db::models::rule::CreateRule;
use demoforge_db::models::version::{CreateVersion, Version};
use demoforge_db::repositories::{ObfuscationRuleRepo, PageRepo, ProjectRepo, VersionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a project with an active version.
async fn seed_project(pool: &PgPool, subdomain: &str) -> (Project, Version) {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: format!("{subdomain} demo"),
            subdomain: subdomain.to_string(),
            tool_name: "acme-app".to_string(),
        },
    )
    .await
    .expect("project creation should succeed");

    let version = VersionRepo::create(
        pool,
        &CreateVersion {
            project_id: project.id,
            capture_strategy: None,
        },
    )
    .await
    .expect("version creation should succeed");

    let project = ProjectRepo::set_active_version(pool, project.id, version.id)
        .await
        .expect("activation should succeed")
        .expect("project should exist");

    (project, version)
}

async fn seed_page(pool: &PgPool, version_id: i64, path: &str, source: &str, content: &str) {
    PageRepo::create(
        pool,
        &CreatePage {
            version_id,
            page_type: None,
            url_source: source.to_string(),
            url_path: path.to_string(),
            parent_page_id: None,
            fingerprint: None,
            synthetic_url: None,
            content: content.to_string(),
            title: Some(path.to_string()),
            captured_at: None,
            load_time_ms: None,
            state_index: None,
        },
    )
    .await
    .expect("page creation should succeed");
}

async fn seed_rule(pool: &PgPool, project_id: i64, search: &str, replace: &str, is_regex: bool) {
    ObfuscationRuleRepo::create(
        pool,
        &CreateRule {
            project_id,
            search_term: search.to_string(),
            replace_term: replace.to_string(),
            is_regex,
            is_active: None,
            sort_order: None,
        },
    )
    .await
    .expect("rule creation should succeed");
}

// ---------------------------------------------------------------------------
// End-to-end serving
// ---------------------------------------------------------------------------

/// Serving a captured page applies obfuscation and link rewriting.
#[sqlx::test(migrations = "../db/migrations")]
async fn serves_obfuscated_and_relinked_page(pool: PgPool) {
    let (project, version) = seed_project(&pool, "acme").await;
    seed_page(
        &pool,
        version.id,
        "home",
        "https://acme-app.com/",
        "<a href='https://acme-app.com/settings'>Settings</a> Acme Corp",
    )
    .await;
    seed_page(
        &pool,
        version.id,
        "settings",
        "https://acme-app.com/settings",
        "<h1>Settings</h1>",
    )
    .await;
    seed_rule(&pool, project.id, "Acme Corp", "Demo Corp", false).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/acme/home").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );

    let body = body_string(response).await;
    assert!(body.contains("/demo/acme/settings"));
    assert!(body.contains("Demo Corp"));
    assert!(!body.contains("Acme Corp"));
}

/// Success responses disable caching and carry sanitized diagnostic
/// headers.
#[sqlx::test(migrations = "../db/migrations")]
async fn demo_response_headers(pool: PgPool) {
    let (_, version) = seed_project(&pool, "acme").await;
    seed_page(
        &pool,
        version.id,
        "home",
        "https://acme-app.com/",
        "<p>hello</p>",
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/acme/home").await;

    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(response.headers().get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(response.headers().get(header::EXPIRES).unwrap(), "0");
    assert_eq!(
        response.headers().get("x-demo-project").unwrap(),
        "acme demo"
    );
    assert_eq!(response.headers().get("x-demo-page").unwrap(), "home");
}

/// State pages resolve through their synthetic URL path.
#[sqlx::test(migrations = "../db/migrations")]
async fn serves_state_page_by_synthetic_url(pool: PgPool) {
    let (_, version) = seed_project(&pool, "acme").await;
    seed_page(
        &pool,
        version.id,
        "app",
        "https://acme-app.com/app",
        "<div id='root'></div>",
    )
    .await;
    let parent = PageRepo::find_by_path(&pool, version.id, "app")
        .await
        .expect("query should succeed")
        .expect("parent should exist");

    PageRepo::create(
        &pool,
        &CreatePage {
            version_id: version.id,
            page_type: Some(PAGE_TYPE_STATE.to_string()),
            url_source: "https://acme-app.com/app".to_string(),
            url_path: "__state/ab12cd34-orders".to_string(),
            parent_page_id: Some(parent.id),
            fingerprint: Some("ab12cd34".to_string()),
            synthetic_url: Some("app/__state/ab12cd34-orders".to_string()),
            content: "<div>Orders panel</div>".to_string(),
            title: Some("Orders".to_string()),
            captured_at: None,
            load_time_ms: None,
            state_index: None,
        },
    )
    .await
    .expect("state creation should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/acme/app/__state/ab12cd34-orders").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Orders panel"));
}

/// One broken regex rule must not stop the valid rules or the request.
#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_regex_rule_is_skipped(pool: PgPool) {
    let (project, version) = seed_project(&pool, "acme").await;
    seed_page(
        &pool,
        version.id,
        "home",
        "https://acme-app.com/",
        "Acme Corp dashboard",
    )
    .await;
    seed_rule(&pool, project.id, "([unclosed", "x", true).await;
    seed_rule(&pool, project.id, "Acme Corp", "Demo Corp", false).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/acme/home").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Demo Corp dashboard"));
}

/// The configured snippet lands before the closing body tag.
#[sqlx::test(migrations = "../db/migrations")]
async fn analytics_snippet_is_injected(pool: PgPool) {
    let (_, version) = seed_project(&pool, "acme").await;
    seed_page(
        &pool,
        version.id,
        "home",
        "https://acme-app.com/",
        "<body><p>hello</p></body>",
    )
    .await;

    let mut config = common::test_config();
    config.analytics_snippet = Some("<script>track()</script>".to_string());
    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/demo/acme/home").await;

    let body = body_string(response).await;
    assert!(body.contains("<p>hello</p><script>track()</script></body>"));
}

// ---------------------------------------------------------------------------
// Resolution failures
// ---------------------------------------------------------------------------

/// Unknown subdomain short-circuits to the localized 404 fragment.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_subdomain_returns_404_fragment(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/demo/does-not-exist/home").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let body = body_string(response).await;
    assert!(body.contains("Demo page not found"));
}

/// A project with no active version is a 404, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn project_without_active_version_returns_404(pool: PgPool) {
    ProjectRepo::create(
        &pool,
        &CreateProject {
            name: "dormant".to_string(),
            subdomain: "dormant".to_string(),
            tool_name: "acme-app".to_string(),
        },
    )
    .await
    .expect("project creation should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/dormant/home").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unknown page within an active version is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_page_returns_404(pool: PgPool) {
    seed_project(&pool, "acme").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/demo/acme/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The 404 fragment follows the Accept-Language header.
#[sqlx::test(migrations = "../db/migrations")]
async fn not_found_fragment_is_localized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_with_header(
        app,
        "/demo/does-not-exist/home",
        "accept-language",
        "es-ES,es;q=0.9",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("Página de demo no encontrada"));
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_reports_db_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}
