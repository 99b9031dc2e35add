//! DOM Binder
//!
//! One pass over a form's controls that builds the field registry: groups
//! checkboxes and radios by name, and finds each field's label and error
//! display element by convention. Missing conventions produce warnings,
//! never errors.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::FormOptions;
use crate::field::{ControlKind, FieldRecord};
use crate::tree::ControlTree;

/// Attribute marking an ancestor that holds a field's error display
pub const ERROR_CONTAINER_ATTR: &str = "data-error-container";

/// Something the binder expected but did not find
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindWarning {
    MissingLabel { field: String },
    MissingErrorContainer { field: String },
}

impl BindWarning {
    pub fn field(&self) -> &str {
        match self {
            BindWarning::MissingLabel { field } | BindWarning::MissingErrorContainer { field } => {
                field
            }
        }
    }
}

impl std::fmt::Display for BindWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindWarning::MissingLabel { field } => write!(
                f,
                "field \"{}\" has no label; add <label for=\"...\"> or wrap the control in a <label>",
                field
            ),
            BindWarning::MissingErrorContainer { field } => write!(
                f,
                "field \"{}\" has no error container; add an element with role=\"alert\" after the control",
                field
            ),
        }
    }
}

/// Output of the binder pass
pub(crate) struct Binding<N> {
    pub fields: IndexMap<String, FieldRecord<N>>,
    pub warnings: Vec<BindWarning>,
}

/// Discovers every named control under `form` and builds one record per
/// field, in document order of each field's first control
pub(crate) fn bind<T: ControlTree>(
    tree: &T,
    form: &T::Node,
    options: &FormOptions,
) -> Binding<T::Node> {
    let controls = tree.form_controls(form);
    let mut fields: IndexMap<String, FieldRecord<T::Node>> = IndexMap::new();
    let mut warnings = Vec::new();

    for control in &controls {
        let Some(name) = tree.attribute(control, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        if fields.contains_key(&name) {
            // later members of a group; a repeated plain name keeps the first control
            continue;
        }

        let control_kind = control_kind(tree, control);
        let members = if control_kind.is_group() {
            group_members(tree, &controls, &name, control_kind)
        } else {
            vec![control.clone()]
        };

        let label = find_label(tree, control);
        if label.is_none() && options.require_labels {
            let warning = BindWarning::MissingLabel { field: name.clone() };
            warn!(field = %name, "{}", warning);
            warnings.push(warning);
        }

        let error_element = if control_kind.is_group() {
            find_group_error_element(tree, form, control)
        } else {
            find_error_element(tree, form, control)
        };
        if error_element.is_none() && options.require_error_containers {
            let warning = BindWarning::MissingErrorContainer { field: name.clone() };
            warn!(field = %name, "{}", warning);
            warnings.push(warning);
        }

        if let Some(record) =
            FieldRecord::new(name.clone(), members, control_kind, label, error_element)
        {
            fields.insert(name, record);
        }
    }

    debug!(
        fields = fields.len(),
        warnings = warnings.len(),
        "bound form controls"
    );
    Binding { fields, warnings }
}

fn control_kind<T: ControlTree>(tree: &T, control: &T::Node) -> ControlKind {
    match tree.input_type(control).as_deref() {
        Some("checkbox") => ControlKind::CheckboxGroup,
        Some("radio") => ControlKind::RadioGroup,
        Some("number") | Some("range") => ControlKind::Numeric,
        _ => ControlKind::Single,
    }
}

fn group_members<T: ControlTree>(
    tree: &T,
    controls: &[T::Node],
    name: &str,
    kind: ControlKind,
) -> Vec<T::Node> {
    controls
        .iter()
        .filter(|c| tree.attribute(*c, "name").as_deref() == Some(name))
        .filter(|c| control_kind(tree, *c) == kind)
        .cloned()
        .collect()
}

/// `label[for=id]`, else the nearest enclosing `label`
fn find_label<T: ControlTree>(tree: &T, control: &T::Node) -> Option<T::Node> {
    if let Some(id) = tree.attribute(control, "id").filter(|id| !id.is_empty()) {
        if let Some(label) = tree.label_for(control, &id) {
            return Some(label);
        }
    }
    tree.ancestors(control)
        .into_iter()
        .find(|node| tree.tag_name(node) == "label")
}

fn is_alert<T: ControlTree>(tree: &T, node: &T::Node) -> bool {
    tree.attribute(node, "role").as_deref() == Some("alert")
}

fn is_error_container<T: ControlTree>(tree: &T, node: &T::Node) -> bool {
    tree.attribute(node, ERROR_CONTAINER_ATTR).is_some()
}

/// First following sibling of `node` with `role="alert"`
fn alert_sibling<T: ControlTree>(tree: &T, node: &T::Node) -> Option<T::Node> {
    let mut current = tree.next_sibling(node);
    while let Some(sibling) = current {
        if is_alert(tree, &sibling) {
            return Some(sibling);
        }
        current = tree.next_sibling(&sibling);
    }
    None
}

fn alert_within<T: ControlTree>(tree: &T, node: &T::Node) -> Option<T::Node> {
    tree.descendants(node)
        .into_iter()
        .find(|child| is_alert(tree, child))
}

/// Ancestors of `node` strictly inside `form`, nearest first
fn ancestors_within<T: ControlTree>(tree: &T, form: &T::Node, node: &T::Node) -> Vec<T::Node> {
    tree.ancestors(node)
        .into_iter()
        .take_while(|ancestor| ancestor != form)
        .collect()
}

/// Alert inside the nearest marked container around `node`
fn alert_in_marked_ancestor<T: ControlTree>(
    tree: &T,
    form: &T::Node,
    node: &T::Node,
) -> Option<T::Node> {
    ancestors_within(tree, form, node)
        .into_iter()
        .filter(|ancestor| is_error_container(tree, ancestor))
        .find_map(|container| alert_within(tree, &container))
}

fn find_error_element<T: ControlTree>(
    tree: &T,
    form: &T::Node,
    control: &T::Node,
) -> Option<T::Node> {
    alert_sibling(tree, control).or_else(|| alert_in_marked_ancestor(tree, form, control))
}

/// Groups are wrapped by their nearest `fieldset`, else by the first
/// member's parent
fn find_group_error_element<T: ControlTree>(
    tree: &T,
    form: &T::Node,
    first: &T::Node,
) -> Option<T::Node> {
    let inside = ancestors_within(tree, form, first);
    let wrapper = inside
        .iter()
        .find(|node| tree.tag_name(*node) == "fieldset")
        .or_else(|| inside.first())
        .cloned();

    if let Some(wrapper) = wrapper {
        if let Some(alert) = alert_sibling(tree, &wrapper) {
            return Some(alert);
        }
        if is_error_container(tree, &wrapper) {
            if let Some(alert) = alert_within(tree, &wrapper) {
                return Some(alert);
            }
        }
    }
    find_error_element(tree, form, first)
}
