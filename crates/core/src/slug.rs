//! URL slug generation for synthetic state pages.
//!
//! The slug format is a persisted compatibility contract: stored state
//! pages are addressed by `__state/{hash}-{slug}` paths, so any change
//! here invalidates previously captured state pages.

/// Maximum slug length after truncation.
const MAX_SLUG_LEN: usize = 30;

/// Turn an arbitrary title into a URL-safe slug.
///
/// Lowercases, collapses every run of non-alphanumeric characters into
/// a single hyphen, strips leading/trailing hyphens, truncates to 30
/// characters, and strips a trailing hyphen left by truncation. Falls
/// back to `"page"` when nothing usable remains.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    // Anything outside [a-z0-9] counts as a separator, so slugs stay
    // plain ASCII regardless of the page title's script.
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    let mut slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
