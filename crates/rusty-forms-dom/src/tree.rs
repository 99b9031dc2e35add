//! Control tree capability
//!
//! The validator never touches a concrete DOM. It talks to a [`ControlTree`],
//! which exposes the handful of element operations the binder and evaluator
//! need. `MemoryDocument` implements it in memory; the wasm crate implements
//! it over `web_sys::Element`.

use std::fmt::Debug;

use crate::constraint::ValidityState;

/// Tags the binder treats as form controls
pub const CONTROL_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// Element operations needed to bind and validate a form
///
/// Node handles are cheap to clone and compare, like DOM element references.
/// Write operations take `&self` because the underlying tree is shared with
/// the host page.
pub trait ControlTree {
    type Node: Clone + PartialEq + Debug;

    /// Lowercase tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Parent element, `None` at the root
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children in document order
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Next element sibling
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Current value of a control (`""` for non-controls)
    fn value(&self, node: &Self::Node) -> String;

    /// Checked state of a checkbox or radio
    fn checked(&self, node: &Self::Node) -> bool;

    /// Native validity, `None` when the node has no constraint-validation API
    fn validity(&self, node: &Self::Node) -> Option<ValidityState>;

    /// Native validation message, `None` when unavailable or empty
    fn validation_message(&self, node: &Self::Node) -> Option<String>;

    fn set_text(&self, node: &Self::Node, text: &str);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// All element descendants in document (pre-)order, excluding `node`
    fn descendants(&self, node: &Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            stack.extend(self.children(&next).into_iter().rev());
            out.push(next);
        }
        out
    }

    /// Ancestors from the parent upwards
    fn ancestors(&self, node: &Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            current = self.parent(&parent);
            out.push(parent);
        }
        out
    }

    /// `input`, `textarea` and `select` descendants of `form`, in document order
    fn form_controls(&self, form: &Self::Node) -> Vec<Self::Node> {
        self.descendants(form)
            .into_iter()
            .filter(|node| CONTROL_TAGS.contains(&self.tag_name(node).as_str()))
            .collect()
    }

    /// First `label` whose `for` attribute equals `id`, searched from the
    /// document root containing `near`
    fn label_for(&self, near: &Self::Node, id: &str) -> Option<Self::Node> {
        let root = self.ancestors(near).pop().unwrap_or_else(|| near.clone());
        self.descendants(&root).into_iter().find(|node| {
            self.tag_name(node) == "label" && self.attribute(node, "for").as_deref() == Some(id)
        })
    }

    /// Lowercase `type` attribute of an `input`, `None` for other tags
    fn input_type(&self, node: &Self::Node) -> Option<String> {
        if self.tag_name(node) != "input" {
            return None;
        }
        Some(
            self.attribute(node, "type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
        )
    }
}
