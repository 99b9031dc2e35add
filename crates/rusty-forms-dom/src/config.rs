// File: src/config.rs
// Purpose: Validator options

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constraint::Violation;
use crate::error::Result;

/// Options given to `form()`
///
/// Deserializes from the camelCase shape used by the JS API:
///
/// ```json
/// { "requireLabels": false, "defaultMessages": { "valueMissing": "Required" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    /// Warn when a field has no label (default: true)
    #[serde(default = "default_true")]
    pub require_labels: bool,

    /// Warn when a field has no error display element (default: true)
    #[serde(default = "default_true")]
    pub require_error_containers: bool,

    /// Form-wide messages for native violations
    #[serde(default)]
    pub default_messages: HashMap<Violation, String>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            require_labels: true,
            require_error_containers: true,
            default_messages: HashMap::new(),
        }
    }
}

impl FormOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn require_labels(mut self, enabled: bool) -> Self {
        self.require_labels = enabled;
        self
    }

    pub fn require_error_containers(mut self, enabled: bool) -> Self {
        self.require_error_containers = enabled;
        self
    }

    pub fn default_message(mut self, violation: Violation, message: impl Into<String>) -> Self {
        self.default_messages.insert(violation, message.into());
        self
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(
            FormOptions::from_json("{}").unwrap(),
            FormOptions::default()
        );
    }

    #[test]
    fn test_json_options() {
        let options = FormOptions::from_json(
            r#"{
                "requireLabels": false,
                "defaultMessages": { "valueMissing": "Required", "tooShort": "Too short" }
            }"#,
        )
        .unwrap();

        let expected = FormOptions::default()
            .require_labels(false)
            .default_message(Violation::ValueMissing, "Required")
            .default_message(Violation::TooShort, "Too short");
        assert_eq!(options, expected);
    }

    #[test]
    fn test_unknown_violation_is_rejected() {
        let err = FormOptions::from_json(r#"{ "defaultMessages": { "badInput": "x" } }"#)
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidOptions(_)));
    }
}
