//! Per-request demo serving orchestration.
//!
//! A short linear pipeline with early-exit failure: resolve project by
//! subdomain, resolve its active version, resolve the requested page,
//! then obfuscate, rewrite links, and run the terminal injection step.
//! Stateless per invocation; all data is fetched fresh from the store.

use demoforge_core::link_rewrite::{self, PageLink};
use demoforge_core::obfuscation;
use demoforge_db::models::page::Page;
use demoforge_db::models::project::Project;
use demoforge_db::repositories::{ObfuscationRuleRepo, PageRepo, ProjectRepo, VersionRepo};
use demoforge_db::DbPool;

use crate::config::ServerConfig;
use crate::error::DemoError;

/// A fully transformed demo page plus the entities it resolved to.
#[derive(Debug)]
pub struct ServedPage {
    pub html: String,
    pub project: Project,
    pub page: Page,
}

/// Resolve and transform the demo page for `GET /demo/{subdomain}/{path}`.
pub async fn serve_demo_page(
    pool: &DbPool,
    config: &ServerConfig,
    subdomain: &str,
    request_path: &str,
) -> Result<ServedPage, DemoError> {
    let project = ProjectRepo::find_by_subdomain(pool, subdomain)
        .await?
        .ok_or_else(|| DemoError::not_found("Project", subdomain))?;

    let version = VersionRepo::find_active(pool, project.id)
        .await?
        .ok_or_else(|| DemoError::not_found("Active version", &project.subdomain))?;

    let page = PageRepo::find_by_path(pool, version.id, request_path)
        .await?
        .ok_or_else(|| DemoError::not_found("Page", request_path))?;

    let rules: Vec<obfuscation::Rule> = ObfuscationRuleRepo::list_active(pool, project.id)
        .await?
        .iter()
        .map(|rule| rule.as_engine_rule())
        .collect();
    let html = obfuscation::apply(&page.content, &rules);

    // list_by_version returns URL-based pages before state pages; the
    // rewriter's lookup is first-wins, so a state never captures its
    // parent's source URL.
    let links: Vec<PageLink> = PageRepo::list_by_version(pool, version.id)
        .await?
        .into_iter()
        .map(|p| PageLink {
            url_source: p.url_source,
            // State pages are addressed by their synthetic URL.
            url_path: p.synthetic_url.unwrap_or(p.url_path),
        })
        .collect();
    let html = link_rewrite::rewrite(&html, &links, subdomain, &config.base_path);

    let html = match &config.analytics_snippet {
        Some(snippet) => super::inject::inject_snippet(&html, snippet),
        None => html,
    };

    tracing::debug!(
        subdomain,
        page_id = page.id,
        path = request_path,
        bytes = html.len(),
        "Serving demo page"
    );

    Ok(ServedPage {
        html,
        project,
        page,
    })
}
