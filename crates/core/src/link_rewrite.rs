//! Link rewriter: points captured internal references at demo routes.
//!
//! This is a pragmatic attribute-value text pass over `href=`/`action=`
//! syntax, not a markup parse. Values that resolve to a captured page
//! are replaced in place; everything else (external links, fragments,
//! malformed URLs) is left exactly as captured.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use url::Url;

/// Placeholder origin used to resolve relative attribute values so
/// their pathname can be extracted. Never appears in output.
const PLACEHOLDER_ORIGIN: &str = "http://demo-placeholder.invalid";

/// The subset of a captured page the rewriter needs.
#[derive(Debug, Clone)]
pub struct PageLink {
    /// Original source URL the page was captured from.
    pub url_source: String,
    /// Demo-route path segment the page is served under.
    pub url_path: String,
}

fn attr_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(href|action)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
            .expect("attribute regex is valid")
    })
}

/// Build the lookup table from every recognizable original-reference
/// form of each page to its demo route.
///
/// The first page to claim a key wins. Captured states inherit their
/// parent page's source URL and must be listed after it, so a
/// reference to the real URL resolves to the parent's route rather
/// than one of its states.
fn build_lookup(pages: &[PageLink], subdomain: &str, base_path: &str) -> HashMap<String, String> {
    let prefix = base_path.trim_end_matches('/');
    let mut table: HashMap<String, String> = HashMap::new();

    for page in pages {
        let target = format!("{prefix}/demo/{subdomain}/{}", page.url_path);

        table
            .entry(page.url_source.clone())
            .or_insert_with(|| target.clone());

        if let Ok(parsed) = Url::parse(&page.url_source) {
            table
                .entry(parsed.path().to_string())
                .or_insert_with(|| target.clone());
            if let Some(query) = parsed.query() {
                table
                    .entry(format!("{}?{query}", parsed.path()))
                    .or_insert_with(|| target.clone());
            }
        }
    }

    table
}

/// Resolve a single attribute value against the lookup table.
///
/// Tries, in order: the exact value, the value with a trailing slash
/// stripped, the value with a trailing slash appended, and finally the
/// pathname alone (relative values resolved against a placeholder
/// origin). Returns `None` when nothing matches or the value cannot be
/// parsed as a URL.
fn resolve<'a>(table: &'a HashMap<String, String>, value: &str) -> Option<&'a String> {
    if let Some(target) = table.get(value) {
        return Some(target);
    }

    if let Some(stripped) = value.strip_suffix('/') {
        if !stripped.is_empty() {
            if let Some(target) = table.get(stripped) {
                return Some(target);
            }
        }
    }

    if let Some(target) = table.get(&format!("{value}/")) {
        return Some(target);
    }

    let base = Url::parse(PLACEHOLDER_ORIGIN).ok()?;
    let joined = base.join(value).ok()?;
    table.get(joined.path())
}

/// Rewrite `href`/`action` attribute values in `html` so references to
/// captured pages point at `/demo/{subdomain}/{url_path}` routes.
pub fn rewrite(html: &str, pages: &[PageLink], subdomain: &str, base_path: &str) -> String {
    if pages.is_empty() {
        return html.to_string();
    }

    let table = build_lookup(pages, subdomain, base_path);

    attr_value_regex()
        .replace_all(html, |caps: &Captures| {
            let name = &caps[1];
            let eq = &caps[2];
            let (value, quote) = match (caps.get(3), caps.get(4)) {
                (Some(v), _) => (v.as_str(), '"'),
                (_, Some(v)) => (v.as_str(), '\''),
                _ => return caps[0].to_string(),
            };

            match resolve(&table, value) {
                Some(target) => format!("{name}{eq}{quote}{target}{quote}"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<PageLink> {
        vec![
            PageLink {
                url_source: "https://a.com/orders".to_string(),
                url_path: "orders".to_string(),
            },
            PageLink {
                url_source: "https://a.com/reports?range=30d".to_string(),
                url_path: "reports".to_string(),
            },
        ]
    }

    #[test]
    fn rewrites_exact_source_url() {
        let html = r#"<a href="https://a.com/orders">Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<a href="/demo/acme/orders">Orders</a>"#);
    }

    #[test]
    fn rewrites_with_trailing_slash_stripped() {
        let html = r#"<a href="https://a.com/orders/">Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert!(out.contains("/demo/acme/orders"));
    }

    #[test]
    fn rewrites_pathname_only_reference() {
        let html = r#"<a href="/orders">Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<a href="/demo/acme/orders">Orders</a>"#);
    }

    #[test]
    fn rewrites_relative_reference_via_pathname() {
        let html = r#"<a href="orders">Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<a href="/demo/acme/orders">Orders</a>"#);
    }

    #[test]
    fn rewrites_pathname_with_query() {
        let html = r#"<a href="/reports?range=30d">Reports</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<a href="/demo/acme/reports">Reports</a>"#);
    }

    #[test]
    fn leaves_unknown_reference_untouched() {
        let html = r#"<a href="/unknown">?</a>"#;
        assert_eq!(rewrite(html, &pages(), "acme", ""), html);
    }

    #[test]
    fn leaves_malformed_value_untouched() {
        let html = r#"<a href="http://[bad">broken</a>"#;
        assert_eq!(rewrite(html, &pages(), "acme", ""), html);
    }

    #[test]
    fn rewrites_form_action() {
        let html = r#"<form ACTION='https://a.com/orders'>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<form ACTION='/demo/acme/orders'>"#);
    }

    #[test]
    fn applies_base_path_prefix() {
        let html = r#"<a href="/orders">Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "/preview");
        assert_eq!(out, r#"<a href="/preview/demo/acme/orders">Orders</a>"#);
    }

    #[test]
    fn state_page_does_not_shadow_parent_source_url() {
        let pages = vec![
            PageLink {
                url_source: "https://a.com/app".to_string(),
                url_path: "app".to_string(),
            },
            PageLink {
                url_source: "https://a.com/app".to_string(),
                url_path: "app/__state/ab12cd34-orders".to_string(),
            },
        ];
        let html = r#"<a href="https://a.com/app">App</a> <a href="/app">App</a>"#;
        let out = rewrite(html, &pages, "acme", "");
        assert_eq!(
            out,
            r#"<a href="/demo/acme/app">App</a> <a href="/demo/acme/app">App</a>"#
        );
    }

    #[test]
    fn preserves_quote_style() {
        let html = r#"<a href='/orders'>Orders</a>"#;
        let out = rewrite(html, &pages(), "acme", "");
        assert_eq!(out, r#"<a href='/demo/acme/orders'>Orders</a>"#);
    }
}
