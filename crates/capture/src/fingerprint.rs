//! DOM state fingerprinting and synthetic URL generation.
//!
//! SPA states share one real URL, so captured states are identified by
//! a structural+text fingerprint and addressed by a synthetic
//! `__state/{hash}-{slug}` path. Both formats are a persisted
//! compatibility contract: changing the hashing or slugging here
//! invalidates the addressability of previously stored state pages.

use demoforge_core::slug::slugify;
use url::Url;

use crate::dom::DomNode;

/// Structural walk depth bound (root = depth 0).
const MAX_STRUCTURE_DEPTH: usize = 4;

/// Maximum length of the captured text sample.
const MAX_TEXT_SAMPLE: usize = 200;

/// Delimiter between per-node structural signatures.
const SIGNATURE_DELIMITER: char = '|';

/// Identity of one rendered SPA state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Fingerprint {
    /// Zero-padded 8-hex-digit combined hash.
    pub hash: String,
    /// First 200 characters of trimmed visible text.
    pub text_sample: String,
}

/// djb2 rolling hash (seed 5381), wrapping at 32 bits after every
/// step. Folds UTF-16 code units, matching the code-unit hashing used
/// when fingerprints are recorded in the page context.
fn djb2(input: &str) -> u32 {
    let mut hash: u32 = 5381;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u32::from(unit));
    }
    hash
}

/// Structural signature of a single node: tag, id, up to three class
/// tokens, ARIA role, ARIA label.
fn node_signature(node: &DomNode) -> String {
    let mut sig = node.tag.clone();
    if let Some(id) = node.attr("id").filter(|id| !id.is_empty()) {
        sig.push('#');
        sig.push_str(id);
    }
    for class in node.class_tokens().iter().take(3) {
        sig.push('.');
        sig.push_str(class);
    }
    if let Some(role) = node.attr("role").filter(|r| !r.is_empty()) {
        sig.push_str("[role=");
        sig.push_str(role);
        sig.push(']');
    }
    if let Some(label) = node.attr("aria-label").filter(|l| !l.is_empty()) {
        sig.push_str("[label=");
        sig.push_str(label);
        sig.push(']');
    }
    sig
}

/// Concatenated depth-first structural string, bounded to
/// [`MAX_STRUCTURE_DEPTH`]. Explicit stack, children pushed reversed
/// so the walk visits parent-before-children left to right.
fn structural_string(root: &DomNode) -> String {
    let mut parts = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        parts.push(node_signature(node));
        if depth < MAX_STRUCTURE_DEPTH {
            for child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    let mut joined = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            joined.push(SIGNATURE_DELIMITER);
        }
        joined.push_str(part);
    }
    joined
}

/// First [`MAX_TEXT_SAMPLE`] characters of whitespace-normalized
/// visible text, parent-before-children order.
fn text_sample(root: &DomNode) -> String {
    let mut sample = String::new();
    for (node, _) in crate::dom::walk(root) {
        if !node.is_visible() {
            continue;
        }
        let text = node.text.trim();
        if text.is_empty() {
            continue;
        }
        if !sample.is_empty() {
            sample.push(' ');
        }
        for word in text.split_whitespace() {
            sample.push_str(word);
            sample.push(' ');
        }
        sample.pop();
        if sample.chars().count() >= MAX_TEXT_SAMPLE {
            break;
        }
    }
    sample.chars().take(MAX_TEXT_SAMPLE).collect()
}

/// Compute the stable identity of the rendered state under `root`.
///
/// Deterministic: identical structural + text input always yields the
/// identical hash. The 32-bit space admits collisions; callers must
/// not treat the hash as globally unique.
pub fn compute_fingerprint(root: &DomNode) -> Fingerprint {
    let structure = structural_string(root);
    let sample = text_sample(root);

    let structure_hex = format!("{:08x}", djb2(&structure));
    let text_hex = format!("{:08x}", djb2(&sample));
    let combined = format!("{:08x}", djb2(&format!("{structure_hex}:{text_hex}")));

    Fingerprint {
        hash: combined,
        text_sample: sample,
    }
}

/// Title for a state page: the document title, else the first heading
/// in the snapshot, else the literal `"page"`.
pub fn state_title(root: &DomNode, document_title: Option<&str>) -> String {
    if let Some(title) = document_title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    for (node, _) in crate::dom::walk(root) {
        if matches!(node.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
            let text = node.text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    "page".to_string()
}

/// Derive the synthetic demo path for a state page.
///
/// Shape: `{base_path}/__state/{hash}-{slug}` where `base_path` is the
/// slash-trimmed path of `base_url` (omitted entirely when empty or
/// when `base_url` does not parse).
pub fn generate_synthetic_url(fingerprint_hash: &str, base_url: &str, title: &str) -> String {
    let base_path = Url::parse(base_url)
        .map(|u| u.path().trim_matches('/').to_string())
        .unwrap_or_default();

    let slug = slugify(title);

    if base_path.is_empty() {
        format!("__state/{fingerprint_hash}-{slug}")
    } else {
        format!("{base_path}/__state/{fingerprint_hash}-{slug}")
    }
}
