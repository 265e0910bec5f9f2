//! Snapshot model of a rendered DOM subtree.
//!
//! The browser host serializes the rendered tree (tags, attributes,
//! the computed-style subset the engines care about, and layout boxes)
//! into this structure before handing it to the capture engines.

use std::collections::HashMap;

use serde::Deserialize;

/// Computed-style subset captured per element.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputedStyle {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub position: String,
    /// Value of `animation-name`; `"none"` (or empty) when no
    /// animation is running.
    #[serde(default)]
    pub animation_name: String,
}

/// Layout bounding box of an element.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// One rendered element plus its subtree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomNode {
    /// Lowercase tag name (`div`, `main`, ...).
    pub tag: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Direct text content of this node, before any descendants.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default)]
    pub rect: BoundingBox,
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    /// Shorthand for constructing a bare element in tests and fixtures.
    pub fn new(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whitespace-separated class tokens, in attribute order.
    pub fn class_tokens(&self) -> Vec<&str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the element is rendered: not `display: none`, not
    /// `visibility: hidden`, and with a non-zero bounding box.
    pub fn is_visible(&self) -> bool {
        self.style.display != "none"
            && self.style.visibility != "hidden"
            && self.rect.width > 0.0
            && self.rect.height > 0.0
    }

    /// Build a short CSS selector identifying this element: `#id` when
    /// an id exists, else `[data-testid="..."]` when present, else the
    /// tag name suffixed with up to two class tokens.
    pub fn selector(&self) -> String {
        if let Some(id) = self.attr("id").filter(|id| !id.is_empty()) {
            return format!("#{id}");
        }
        if let Some(testid) = self.attr("data-testid").filter(|t| !t.is_empty()) {
            return format!("[data-testid=\"{testid}\"]");
        }
        let mut selector = self.tag.clone();
        for token in self.class_tokens().iter().take(2) {
            selector.push('.');
            selector.push_str(token);
        }
        selector
    }
}

/// Iterate the tree depth-first (parent before children) with an
/// explicit stack, yielding each node with its depth (root = 0).
///
/// Iterative on purpose: pathological trees must not overflow the call
/// stack.
pub fn walk<'a>(root: &'a DomNode) -> impl Iterator<Item = (&'a DomNode, usize)> + 'a {
    let mut stack = vec![(root, 0usize)];
    std::iter::from_fn(move || {
        let (node, depth) = stack.pop()?;
        // Push children reversed so the leftmost child pops first.
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
        Some((node, depth))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_attr(tag: &str, name: &str, value: &str) -> DomNode {
        let mut node = DomNode::new(tag);
        node.attributes.insert(name.to_string(), value.to_string());
        node
    }

    #[test]
    fn walk_is_depth_first_parent_before_children() {
        let mut root = DomNode::new("main");
        let mut left = DomNode::new("section");
        left.children.push(DomNode::new("p"));
        root.children.push(left);
        root.children.push(DomNode::new("footer"));

        let order: Vec<(&str, usize)> = walk(&root).map(|(n, d)| (n.tag.as_str(), d)).collect();
        assert_eq!(
            order,
            vec![("main", 0), ("section", 1), ("p", 2), ("footer", 1)]
        );
    }

    #[test]
    fn selector_prefers_id() {
        let mut node = with_attr("div", "id", "cart");
        node.attributes
            .insert("data-testid".to_string(), "cart-box".to_string());
        assert_eq!(node.selector(), "#cart");
    }

    #[test]
    fn selector_falls_back_to_testid() {
        let node = with_attr("div", "data-testid", "cart-box");
        assert_eq!(node.selector(), "[data-testid=\"cart-box\"]");
    }

    #[test]
    fn selector_uses_tag_and_two_classes() {
        let node = with_attr("button", "class", "btn btn-primary large");
        assert_eq!(node.selector(), "button.btn.btn-primary");
    }

    #[test]
    fn zero_sized_element_is_not_visible() {
        let node = DomNode::new("div");
        assert!(!node.is_visible());
    }

    #[test]
    fn hidden_element_is_not_visible() {
        let mut node = DomNode::new("div");
        node.rect = BoundingBox {
            width: 10.0,
            height: 10.0,
        };
        node.style.visibility = "hidden".to_string();
        assert!(!node.is_visible());
    }
}
