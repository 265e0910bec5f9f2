//! Obfuscation engine: ordered search/replace over captured HTML.
//!
//! Rules run strictly in the order supplied; each rule's output feeds
//! the next, so no idempotence is guaranteed across repeated passes (a
//! replacement may itself match a later rule). A rule whose pattern
//! fails to compile is logged and skipped without aborting the rest.

use regex::Regex;

/// A single search/replace instruction, already ordered by the caller.
#[derive(Debug, Clone)]
pub struct Rule {
    pub search_term: String,
    pub replace_term: String,
    pub is_regex: bool,
    pub is_active: bool,
}

/// Result of a dry-run preview of a rule set against sample HTML.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PreviewResult {
    pub original: String,
    pub obfuscated: String,
    /// Sum of per-rule match counts against the *original* sample.
    /// An approximation: rules interact, so this is not an exact count
    /// of edits in the transformed output.
    pub changes_count: usize,
}

/// Compile a rule's pattern. Literal rules have all regex
/// metacharacters escaped first.
fn compile_rule(rule: &Rule) -> Option<Regex> {
    let pattern = if rule.is_regex {
        rule.search_term.clone()
    } else {
        regex::escape(&rule.search_term)
    };
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(
                search_term = %rule.search_term,
                error = %err,
                "Skipping obfuscation rule with invalid pattern"
            );
            None
        }
    }
}

/// Apply the rule list to `html`, in order, skipping inactive rules.
pub fn apply(html: &str, rules: &[Rule]) -> String {
    let mut output = html.to_string();
    for rule in rules {
        if !rule.is_active {
            continue;
        }
        let Some(re) = compile_rule(rule) else {
            continue;
        };
        output = if rule.is_regex {
            // Regex rules may reference capture groups ($1, ...) in the
            // replacement.
            re.replace_all(&output, rule.replace_term.as_str())
                .into_owned()
        } else {
            // Literal rules must not treat `$` in the replacement as a
            // capture reference.
            re.replace_all(&output, regex::NoExpand(&rule.replace_term))
                .into_owned()
        };
    }
    output
}

/// Dry-run a rule set against sample HTML without persisting anything.
pub fn preview(sample_html: &str, rules: &[Rule]) -> PreviewResult {
    let changes_count = rules
        .iter()
        .filter(|r| r.is_active)
        .filter_map(compile_rule)
        .map(|re| re.find_iter(sample_html).count())
        .sum();

    PreviewResult {
        original: sample_html.to_string(),
        obfuscated: apply(sample_html, rules),
        changes_count,
    }
}
