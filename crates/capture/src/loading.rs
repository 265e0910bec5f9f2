//! Loading-indicator detection.
//!
//! Classifies the in-flight indicator shown while an SPA transition
//! settles. The checks form an ordered cascade over the whole snapshot
//! and the first matching check wins, so an ARIA progressbar always
//! outranks a `.spinner`-classed element.

use serde::Serialize;

use crate::dom::{walk, DomNode};

/// Class-attribute substrings that mark an element as a loading
/// indicator.
const INDICATOR_CLASS_TOKENS: [&str; 4] = ["spinner", "loader", "loading", "skeleton"];

/// Indicator classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Spinner,
    Skeleton,
    Progress,
}

impl IndicatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKind::Spinner => "spinner",
            IndicatorKind::Skeleton => "skeleton",
            IndicatorKind::Progress => "progress",
        }
    }
}

/// Outcome of a detection pass.
#[derive(Debug, Clone, Serialize)]
pub struct LoadingIndicator {
    pub detected: bool,
    pub kind: Option<IndicatorKind>,
    /// Selector of the matched element, when one was found.
    pub selector: Option<String>,
    /// How long the indicator stayed up, when the caller measured it.
    pub duration_ms: Option<u64>,
}

impl LoadingIndicator {
    fn none() -> Self {
        LoadingIndicator {
            detected: false,
            kind: None,
            selector: None,
            duration_ms: None,
        }
    }

    fn found(kind: IndicatorKind, node: &DomNode) -> Self {
        LoadingIndicator {
            detected: true,
            kind: Some(kind),
            selector: Some(node.selector()),
            duration_ms: None,
        }
    }
}

/// Run the detection cascade over the snapshot.
///
/// Order: ARIA progressbar, `aria-busy`, visible indicator-classed
/// element, animated element inside a fixed/absolute container.
pub fn detect_loading_indicator(root: &DomNode) -> LoadingIndicator {
    if let Some(node) = find(root, |n| n.attr("role") == Some("progressbar")) {
        return LoadingIndicator::found(IndicatorKind::Progress, node);
    }

    if let Some(node) = find(root, |n| n.attr("aria-busy") == Some("true")) {
        return LoadingIndicator::found(IndicatorKind::Spinner, node);
    }

    if let Some((node, kind)) = find_by_class(root) {
        return LoadingIndicator::found(kind, node);
    }

    if let Some(node) = find_animated_overlay(root) {
        return LoadingIndicator::found(IndicatorKind::Spinner, node);
    }

    LoadingIndicator::none()
}

fn find<'a>(root: &'a DomNode, pred: impl Fn(&DomNode) -> bool) -> Option<&'a DomNode> {
    walk(root).map(|(node, _)| node).find(|node| pred(node))
}

/// First visible element whose class attribute contains an indicator
/// substring. `skeleton` classifies as a skeleton screen, the rest as
/// spinners.
fn find_by_class(root: &DomNode) -> Option<(&DomNode, IndicatorKind)> {
    for (node, _) in walk(root) {
        if !node.is_visible() {
            continue;
        }
        let Some(class) = node.attr("class") else {
            continue;
        };
        for token in INDICATOR_CLASS_TOKENS {
            if class.contains(token) {
                let kind = if token == "skeleton" {
                    IndicatorKind::Skeleton
                } else {
                    IndicatorKind::Spinner
                };
                return Some((node, kind));
            }
        }
    }
    None
}

fn is_overlay_position(node: &DomNode) -> bool {
    node.style.position == "fixed" || node.style.position == "absolute"
}

fn has_animation(node: &DomNode) -> bool {
    !node.style.animation_name.is_empty() && node.style.animation_name != "none"
}

/// Animated element whose inclusive ancestor chain contains a
/// fixed/absolute-positioned element. Tracked during the walk with a
/// per-depth overlay flag so the pass stays single traversal.
fn find_animated_overlay(root: &DomNode) -> Option<&DomNode> {
    // Stack carries (node, ancestor-or-self-is-overlay-so-far).
    let mut stack = vec![(root, is_overlay_position(root))];
    while let Some((node, in_overlay)) = stack.pop() {
        let in_overlay = in_overlay || is_overlay_position(node);
        if in_overlay && has_animation(node) {
            return Some(node);
        }
        for child in node.children.iter().rev() {
            stack.push((child, in_overlay));
        }
    }
    None
}
