//! Value Extractor
//!
//! Reads a field's current value and coerces it to what each field kind
//! validates against.

use crate::field::{ControlKind, FieldRecord};
use crate::tree::ControlTree;
use rusty_forms_validation::parse_number;

/// Current value of a field as read from the page
///
/// `Text(String::new())` doubles as the empty sentinel for numeric inputs
/// that hold no number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

/// A value seen through a number field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberInput {
    Empty,
    Value(f64),
    /// non-empty text that is not a number
    Invalid,
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Value seen through a string field
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::List(items) => items.join(","),
        }
    }

    /// Value seen through a number field
    pub fn as_number(&self) -> NumberInput {
        match self {
            FieldValue::Number(n) => NumberInput::Value(*n),
            other => {
                let text = other.as_text();
                if text.trim().is_empty() {
                    NumberInput::Empty
                } else {
                    parse_number(&text).map_or(NumberInput::Invalid, NumberInput::Value)
                }
            }
        }
    }

    /// Value seen through an array field
    pub fn as_items(&self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items.clone(),
            FieldValue::Text(text) if text.is_empty() => Vec::new(),
            other => vec![other.as_text()],
        }
    }
}

/// Reads the current value of a field
///
/// - checkbox groups: values of the checked boxes, in document order
/// - radio groups: value of the checked option, or `""`
/// - numeric inputs: the number, or the `""` sentinel when there is none
/// - everything else: the control's string value
pub fn extract_value<T: ControlTree>(tree: &T, record: &FieldRecord<T::Node>) -> FieldValue {
    match record.control_kind() {
        ControlKind::CheckboxGroup => FieldValue::List(
            record
                .members()
                .iter()
                .filter(|member| tree.checked(member))
                .map(|member| checkable_value(tree, member))
                .collect(),
        ),
        ControlKind::RadioGroup => record
            .members()
            .iter()
            .find(|member| tree.checked(member))
            .map(|member| FieldValue::Text(checkable_value(tree, member)))
            .unwrap_or_else(FieldValue::empty),
        ControlKind::Numeric => parse_number(&tree.value(record.control()))
            .map(FieldValue::Number)
            .unwrap_or_else(FieldValue::empty),
        ControlKind::Single => FieldValue::Text(tree.value(record.control())),
    }
}

/// Checkboxes and radios without a value attribute submit "on"
fn checkable_value<T: ControlTree>(tree: &T, node: &T::Node) -> String {
    tree.attribute(node, "value")
        .unwrap_or_else(|| "on".to_string())
}
