// File: src/field.rs
// Purpose: Registry record for one logical form field

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::constraint::Violation;
use crate::rules::Rule;

/// Value type a field's rules are declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Array,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Array => "array",
        })
    }
}

/// How the field's value is read off the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    /// text-like inputs, textarea, select
    Single,
    /// `input[type=number]` and `input[type=range]`
    Numeric,
    /// every `input[type=checkbox]` sharing the name
    CheckboxGroup,
    /// every `input[type=radio]` sharing the name
    RadioGroup,
}

impl ControlKind {
    pub fn is_group(self) -> bool {
        matches!(self, ControlKind::CheckboxGroup | ControlKind::RadioGroup)
    }
}

/// One logical field: a named control, or a checkbox/radio group
///
/// Created once by the binder. Rule chains append rules and set the kind;
/// validation only touches the page, never the record.
#[derive(Debug, Clone)]
pub struct FieldRecord<N> {
    name: String,
    control: N,
    members: Vec<N>,
    control_kind: ControlKind,
    label: Option<N>,
    error_element: Option<N>,
    messages: HashMap<Violation, String>,
    kind: Option<FieldKind>,
    rules: Vec<Rule>,
}

impl<N: Clone> FieldRecord<N> {
    pub(crate) fn new(
        name: String,
        members: Vec<N>,
        control_kind: ControlKind,
        label: Option<N>,
        error_element: Option<N>,
    ) -> Option<Self> {
        let control = members.first()?.clone();
        Some(Self {
            name,
            control,
            members,
            control_kind,
            label,
            error_element,
            messages: HashMap::new(),
            kind: None,
            rules: Vec::new(),
        })
    }
}

impl<N> FieldRecord<N> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound control; the first member for groups
    pub fn control(&self) -> &N {
        &self.control
    }

    /// Every control backing the field, in document order
    pub fn members(&self) -> &[N] {
        &self.members
    }

    pub fn control_kind(&self) -> ControlKind {
        self.control_kind
    }

    pub fn label(&self) -> Option<&N> {
        self.label.as_ref()
    }

    pub fn error_element(&self) -> Option<&N> {
        self.error_element.as_ref()
    }

    /// Per-violation native message overrides
    pub fn messages(&self) -> &HashMap<Violation, String> {
        &self.messages
    }

    /// Declared kind, `None` until a type selector is called
    pub fn kind(&self) -> Option<FieldKind> {
        self.kind
    }

    /// Rules in declaration order, including ones declared under an
    /// earlier kind
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules that take part in evaluation under the current kind
    pub fn active_rules(&self) -> impl Iterator<Item = &Rule> {
        let kind = self.kind;
        self.rules
            .iter()
            .filter(move |rule| Some(rule.kind()) == kind)
    }

    /// Serializable snapshot of the record, without node handles
    pub fn summary(&self) -> FieldSummary {
        FieldSummary {
            name: self.name.clone(),
            kind: self.kind,
            control_kind: self.control_kind,
            members: self.members.len(),
            has_label: self.label.is_some(),
            has_error_element: self.error_element.is_some(),
            messages: self
                .messages
                .iter()
                .map(|(violation, message)| (*violation, message.clone()))
                .collect(),
            rules: self
                .rules
                .iter()
                .map(|rule| RuleSummary {
                    rule: rule.constraint().name(),
                    kind: rule.kind(),
                    argument: rule.constraint().argument(),
                    message: rule.message().map(str::to_string),
                    active: Some(rule.kind()) == self.kind,
                })
                .collect(),
        }
    }

    pub(crate) fn set_kind(&mut self, kind: FieldKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub(crate) fn last_rule_mut(&mut self) -> Option<&mut Rule> {
        self.rules.last_mut()
    }

    pub(crate) fn set_message(&mut self, violation: Violation, message: String) {
        self.messages.insert(violation, message);
    }
}

/// Inspection view of a [`FieldRecord`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub name: String,
    pub kind: Option<FieldKind>,
    pub control_kind: ControlKind,
    pub members: usize,
    pub has_label: bool,
    pub has_error_element: bool,
    pub messages: BTreeMap<Violation, String>,
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSummary {
    pub rule: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Constraint;
    use serde_json::json;

    #[test]
    fn test_summary_serializes() {
        let mut record = FieldRecord::new(
            "tags".to_string(),
            vec![1, 2, 3],
            ControlKind::CheckboxGroup,
            None,
            Some(9),
        )
        .unwrap();
        record.set_kind(FieldKind::String);
        record.push_rule(Rule::new(FieldKind::String, Constraint::Required));
        record.set_kind(FieldKind::Array);
        record.push_rule(Rule::new(FieldKind::Array, Constraint::Max(2.0)));
        if let Some(rule) = record.last_rule_mut() {
            rule.set_message("Two at most".to_string());
        }
        record.set_message(Violation::ValueMissing, "Pick one".to_string());

        let value = serde_json::to_value(record.summary()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "tags",
                "kind": "array",
                "controlKind": "checkboxGroup",
                "members": 3,
                "hasLabel": false,
                "hasErrorElement": true,
                "messages": { "valueMissing": "Pick one" },
                "rules": [
                    { "rule": "required", "kind": "string", "active": false },
                    {
                        "rule": "max",
                        "kind": "array",
                        "argument": "2",
                        "message": "Two at most",
                        "active": true
                    }
                ]
            })
        );
    }
}
