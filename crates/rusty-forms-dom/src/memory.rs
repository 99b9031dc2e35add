//! In-memory control tree
//!
//! [`MemoryDocument`] is a small element tree with just enough form
//! behaviour to drive the validator outside a browser: attributes, values,
//! checked state, text, inline styles, and native validity computed from
//! the usual constraint attributes.
//!
//! Handles are shared: clone the document, keep one copy to edit values
//! and inspect results, and give the other to the validator.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use indexmap::IndexMap;
use regex::Regex;
use rusty_forms_validation::parse_number;

use crate::constraint::ValidityState;
use crate::tree::{ControlTree, CONTROL_TAGS};

/// Handle on an element of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    value: String,
    checked: bool,
    text: String,
    style: BTreeMap<String, String>,
    custom_validity: String,
}

#[derive(Debug, Default)]
struct Arena {
    elements: Vec<Element>,
}

/// Shared, mutable element tree
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    arena: Rc<RefCell<Arena>>,
    root: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document with a `body` root
    pub fn new() -> Self {
        let arena = Arena {
            elements: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
        };
        Self {
            arena: Rc::new(RefCell::new(arena)),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached element
    ///
    /// `value` and `checked` attributes also seed the element's live value
    /// and checked state, like parsed HTML does.
    pub fn create_element(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut element = Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        };
        for (name, value) in attributes {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
        if let Some(value) = element.attributes.get("value") {
            element.value = value.clone();
        }
        element.checked = element.attributes.contains_key("checked");

        let mut arena = self.arena.borrow_mut();
        arena.elements.push(element);
        NodeId(arena.elements.len() - 1)
    }

    /// Appends `child` as the last child of `parent`, detaching it first
    ///
    /// Returns `false` and leaves the tree unchanged when `parent` is
    /// `child` or one of its descendants.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> bool {
        let mut arena = self.arena.borrow_mut();
        let mut cursor = Some(parent.0);
        while let Some(index) = cursor {
            if index == child.0 {
                return false;
            }
            cursor = arena.elements[index].parent;
        }
        if let Some(old) = arena.elements[child.0].parent.take() {
            arena.elements[old].children.retain(|c| *c != child.0);
        }
        arena.elements[child.0].parent = Some(parent.0);
        arena.elements[parent.0].children.push(child.0);
        true
    }

    /// Creates an element and appends it to `parent`
    pub fn append(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let child = self.create_element(tag, attributes);
        self.append_child(parent, child);
        child
    }

    /// Creates an element holding `text` and appends it to `parent`
    pub fn append_text(
        &self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let node = self.append(parent, tag, attributes);
        self.set_text(&node, text);
        node
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.arena.borrow_mut().elements[node.0].value = value.to_string();
    }

    pub fn set_checked(&self, node: NodeId, checked: bool) {
        self.arena.borrow_mut().elements[node.0].checked = checked;
    }

    /// Like `setCustomValidity`: a non-empty message flags a custom error
    pub fn set_custom_validity(&self, node: NodeId, message: &str) {
        self.arena.borrow_mut().elements[node.0].custom_validity = message.to_string();
    }

    pub fn text(&self, node: NodeId) -> String {
        self.arena.borrow().elements[node.0].text.clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.arena.borrow().elements[node.0]
            .style
            .get(property)
            .cloned()
    }

    fn with<R>(&self, node: &NodeId, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.arena.borrow().elements[node.0])
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        std::iter::once(*node)
            .chain(self.ancestors(node))
            .any(|n| {
                self.with(&n, |e| {
                    e.attributes.contains_key("disabled")
                        && (n == *node || e.tag == "fieldset")
                })
            })
    }

    fn attr_number(&self, node: &NodeId, name: &str) -> Option<f64> {
        self.attribute(node, name)
            .and_then(|raw| parse_number(&raw))
    }

    fn attr_length(&self, node: &NodeId, name: &str) -> Option<usize> {
        self.attribute(node, name)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
    }

    fn radio_group_checked(&self, node: &NodeId) -> bool {
        let name = self.attribute(node, "name").unwrap_or_default();
        if name.is_empty() {
            return self.checked(node);
        }
        let form = self
            .ancestors(node)
            .into_iter()
            .find(|n| self.tag_name(n) == "form");
        let scope = form.unwrap_or(self.root);
        self.form_controls(&scope).into_iter().any(|candidate| {
            self.input_type(&candidate).as_deref() == Some("radio")
                && self.attribute(&candidate, "name").as_deref() == Some(name.as_str())
                && self.checked(&candidate)
        })
    }

    fn compute_validity(&self, node: &NodeId) -> ValidityState {
        let mut validity = ValidityState {
            custom_error: self.with(node, |e| !e.custom_validity.is_empty()),
            ..ValidityState::default()
        };
        if self.is_disabled(node) {
            return ValidityState::default();
        }

        let tag = self.tag_name(node);
        let input_type = self.input_type(node).unwrap_or_else(|| tag.clone());
        if matches!(
            input_type.as_str(),
            "button" | "submit" | "reset" | "hidden" | "image"
        ) {
            return ValidityState::default();
        }

        let value = self.value(node);
        let required = self.attribute(node, "required").is_some()
            && self.attribute(node, "readonly").is_none();
        if required {
            validity.value_missing = match input_type.as_str() {
                "checkbox" => !self.checked(node),
                "radio" => !self.radio_group_checked(node),
                _ => value.is_empty(),
            };
        }
        if value.is_empty() || tag == "select" {
            return validity;
        }

        match input_type.as_str() {
            "email" => validity.type_mismatch = !is_html_email(&value),
            "url" => validity.type_mismatch = !is_absolute_url(&value),
            "number" | "range" => {
                if let Some(n) = parse_number(&value) {
                    self.check_range(node, n, &input_type, &mut validity);
                }
            }
            _ => {}
        }

        if matches!(
            input_type.as_str(),
            "text" | "search" | "url" | "tel" | "email" | "password" | "textarea"
        ) {
            let len = value.chars().count();
            if let Some(min) = self.attr_length(node, "minlength") {
                validity.too_short = len < min;
            }
            if let Some(max) = self.attr_length(node, "maxlength") {
                validity.too_long = len > max;
            }
            if tag == "input" {
                if let Some(pattern) = self.attribute(node, "pattern").filter(|p| !p.is_empty()) {
                    // the attribute must match the whole value
                    if let Ok(regex) = Regex::new(&format!("^(?:{})$", pattern)) {
                        validity.pattern_mismatch = !regex.is_match(&value);
                    }
                }
            }
        }

        validity
    }

    fn check_range(&self, node: &NodeId, n: f64, input_type: &str, validity: &mut ValidityState) {
        let min = self.attr_number(node, "min");
        if let Some(min) = min {
            validity.range_underflow = n < min;
        }
        if let Some(max) = self.attr_number(node, "max") {
            validity.range_overflow = n > max;
        }

        let step_attr = self.attribute(node, "step").unwrap_or_default();
        if step_attr.trim().eq_ignore_ascii_case("any") {
            return;
        }
        let step = parse_number(&step_attr)
            .filter(|s| *s > 0.0)
            .unwrap_or(1.0);
        let base = min.unwrap_or(0.0);
        let ratio = (n - base) / step;
        // browsers compare against the nearest step with a small tolerance
        if (ratio - ratio.round()).abs() > 1e-7 && input_type == "number" {
            validity.step_mismatch = true;
        }
    }
}

/// `type=email` syntax: one `@`, a plain local part, dot-separated
/// alphanumeric/hyphen domain labels
fn is_html_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

/// `type=url` syntax: a scheme followed by `:` and something
fn is_absolute_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        && !rest.is_empty()
}

impl ControlTree for MemoryDocument {
    type Node = NodeId;

    fn tag_name(&self, node: &NodeId) -> String {
        self.with(node, |e| e.tag.clone())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with(node, |e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.arena.borrow_mut().elements[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.arena.borrow_mut().elements[node.0]
            .attributes
            .shift_remove(name);
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.with(node, |e| e.parent.map(NodeId))
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.with(node, |e| e.children.iter().copied().map(NodeId).collect())
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(&parent);
        let index = siblings.iter().position(|s| s == node)?;
        siblings.get(index + 1).copied()
    }

    fn value(&self, node: &NodeId) -> String {
        self.with(node, |e| e.value.clone())
    }

    fn checked(&self, node: &NodeId) -> bool {
        self.with(node, |e| e.checked)
    }

    fn validity(&self, node: &NodeId) -> Option<ValidityState> {
        let tag = self.tag_name(node);
        if !CONTROL_TAGS.contains(&tag.as_str()) {
            return None;
        }
        Some(self.compute_validity(node))
    }

    fn validation_message(&self, node: &NodeId) -> Option<String> {
        Some(self.with(node, |e| e.custom_validity.clone())).filter(|m| !m.is_empty())
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.arena.borrow_mut().elements[node.0].text = text.to_string();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.arena.borrow_mut().elements[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> (MemoryDocument, NodeId) {
        let doc = MemoryDocument::new();
        let form = doc.append(doc.root(), "form", &[]);
        (doc, form)
    }

    #[test]
    fn test_tree_navigation() {
        let (doc, form) = form();
        let label = doc.append(form, "label", &[]);
        let input = doc.append(label, "input", &[("name", "a")]);
        let alert = doc.append(form, "div", &[("role", "alert")]);

        assert_eq!(doc.children(&form), vec![label, alert]);
        assert_eq!(doc.next_sibling(&label), Some(alert));
        assert_eq!(doc.next_sibling(&alert), None);
        assert_eq!(doc.ancestors(&input), vec![label, form, doc.root()]);
        assert_eq!(doc.descendants(&form), vec![label, input, alert]);
        assert_eq!(doc.form_controls(&form), vec![input]);
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let (doc, form) = form();
        let outer = doc.append(form, "div", &[]);
        let inner = doc.append(outer, "div", &[]);

        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(outer, outer));
        assert_eq!(doc.parent(&outer), Some(form));
        assert_eq!(doc.descendants(&form), vec![outer, inner]);

        // moving a subtree elsewhere is still allowed
        let other = doc.append(form, "section", &[]);
        assert!(doc.append_child(other, outer));
        assert_eq!(doc.children(&form), vec![other]);
        assert_eq!(doc.descendants(&other), vec![outer, inner]);
    }

    #[test]
    fn test_seeded_value_and_checked() {
        let (doc, form) = form();
        let text = doc.append(form, "input", &[("value", "hi")]);
        let check = doc.append(form, "input", &[("type", "checkbox"), ("checked", "")]);

        assert_eq!(doc.value(&text), "hi");
        assert!(doc.checked(&check));
        assert_eq!(doc.input_type(&text).as_deref(), Some("text"));
    }

    #[test]
    fn test_label_for_searches_whole_document() {
        let doc = MemoryDocument::new();
        let label = doc.append(doc.root(), "label", &[("for", "email")]);
        let form = doc.append(doc.root(), "form", &[]);
        let input = doc.append(form, "input", &[("id", "email")]);

        assert_eq!(doc.label_for(&input, "email"), Some(label));
        assert_eq!(doc.label_for(&input, "other"), None);
    }

    #[test]
    fn test_required_validity() {
        let (doc, form) = form();
        let input = doc.append(form, "input", &[("required", "")]);
        assert!(doc.validity(&input).unwrap().value_missing);

        doc.set_value(input, "x");
        assert!(doc.validity(&input).unwrap().valid());

        let div = doc.append(form, "div", &[]);
        assert_eq!(doc.validity(&div), None);
    }

    #[test]
    fn test_required_radio_group() {
        let (doc, form) = form();
        let a = doc.append(
            form,
            "input",
            &[("type", "radio"), ("name", "size"), ("required", "")],
        );
        let b = doc.append(form, "input", &[("type", "radio"), ("name", "size")]);
        assert!(doc.validity(&a).unwrap().value_missing);

        doc.set_checked(b, true);
        assert!(!doc.validity(&a).unwrap().value_missing);
    }

    #[test]
    fn test_text_constraints() {
        let (doc, form) = form();
        let input = doc.append(
            form,
            "input",
            &[
                ("minlength", "3"),
                ("maxlength", "5"),
                ("pattern", "[a-z]+"),
            ],
        );

        doc.set_value(input, "ab");
        assert!(doc.validity(&input).unwrap().too_short);

        doc.set_value(input, "abcdef");
        assert!(doc.validity(&input).unwrap().too_long);

        doc.set_value(input, "abC");
        let validity = doc.validity(&input).unwrap();
        assert!(validity.pattern_mismatch);
        assert!(!validity.too_short);
    }

    #[test]
    fn test_number_constraints() {
        let (doc, form) = form();
        let input = doc.append(
            form,
            "input",
            &[
                ("type", "number"),
                ("min", "1"),
                ("max", "10"),
                ("step", "0.5"),
            ],
        );

        doc.set_value(input, "0");
        assert!(doc.validity(&input).unwrap().range_underflow);
        doc.set_value(input, "11");
        assert!(doc.validity(&input).unwrap().range_overflow);
        doc.set_value(input, "2.25");
        assert!(doc.validity(&input).unwrap().step_mismatch);
        doc.set_value(input, "2.5");
        assert!(doc.validity(&input).unwrap().valid());
    }

    #[test]
    fn test_type_mismatch() {
        let (doc, form) = form();
        let email = doc.append(form, "input", &[("type", "email"), ("value", "nope")]);
        let url = doc.append(form, "input", &[("type", "url"), ("value", "https://x.io")]);

        assert!(doc.validity(&email).unwrap().type_mismatch);
        assert!(doc.validity(&url).unwrap().valid());
        doc.set_value(email, "me@example.com");
        assert!(doc.validity(&email).unwrap().valid());
    }

    #[test]
    fn test_disabled_and_custom_validity() {
        let (doc, form) = form();
        let fieldset = doc.append(form, "fieldset", &[("disabled", "")]);
        let inside = doc.append(fieldset, "input", &[("required", "")]);
        assert!(doc.validity(&inside).unwrap().valid());

        let input = doc.append(form, "input", &[]);
        doc.set_custom_validity(input, "Taken");
        assert!(doc.validity(&input).unwrap().custom_error);
        assert_eq!(doc.validation_message(&input).as_deref(), Some("Taken"));
    }

    #[test]
    fn test_attribute_and_style_writes() {
        let (doc, form) = form();
        let node = doc.append(form, "span", &[]);
        doc.set_attribute(&node, "aria-invalid", "true");
        assert_eq!(
            doc.attribute(&node, "aria-invalid").as_deref(),
            Some("true")
        );
        doc.remove_attribute(&node, "aria-invalid");
        assert_eq!(doc.attribute(&node, "aria-invalid"), None);

        doc.set_style(&node, "visibility", "hidden");
        assert_eq!(doc.style(node, "visibility").as_deref(), Some("hidden"));
    }
}
