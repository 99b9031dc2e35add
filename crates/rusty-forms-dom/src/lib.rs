//! # Rusty-Forms DOM
//!
//! Declarative field validation for HTML forms.
//!
//! A [`FormValidator`] binds once to a form: every named `input`, `textarea`
//! and `select` becomes a field (checkbox and radio groups become one field
//! per name), with its label and error display found by convention. Callers
//! attach typed rule chains per field, then call
//! [`validate`](FormValidator::validate) whenever they need an answer.
//!
//! Each pass reports at most one message per field. Native constraint
//! violations (`required`, `pattern`, `min`, ... attributes) win over custom
//! rules, and custom rules stop at the first failure. The field's error
//! element gets the message and `aria-invalid` is set on the control;
//! valid fields are cleared.
//!
//! ## Example
//!
//! ```rust
//! use rusty_forms_dom::{form, FormOptions, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let form_el = doc.append(doc.root(), "form", &[]);
//! let label = doc.append_text(form_el, "label", &[("for", "age")], "Age");
//! let age = doc.append(form_el, "input", &[("id", "age"), ("name", "age"), ("type", "number")]);
//! let alert = doc.append(form_el, "span", &[("role", "alert")]);
//!
//! let mut validator = form(doc.clone(), Some(form_el), FormOptions::default()).unwrap();
//! validator
//!     .field("age")
//!     .unwrap()
//!     .number()
//!     .required()
//!     .min(18.0)
//!     .message("You must be an adult")
//!     .max(100.0);
//!
//! doc.set_value(age, "17");
//! let result = validator.validate();
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].message, "You must be an adult");
//! assert_eq!(doc.text(alert), "You must be an adult");
//! # let _ = label;
//! ```
//!
//! The page is reached through the [`ControlTree`] trait;
//! [`MemoryDocument`] implements it in memory and `rusty-forms-dom-wasm`
//! implements it over the browser DOM.

pub mod binder;
pub mod chain;
pub mod config;
pub mod constraint;
pub mod error;
pub mod field;
pub mod memory;
pub mod result;
pub mod rules;
pub mod tree;
pub mod validator;
pub mod value;

pub use binder::BindWarning;
pub use chain::{ArrayChain, FieldChain, NumberChain, StringChain};
pub use config::FormOptions;
pub use constraint::{ValidityState, Violation};
pub use error::FormError;
pub use field::{ControlKind, FieldKind, FieldRecord, FieldSummary, RuleSummary};
pub use memory::{MemoryDocument, NodeId};
pub use result::{FormValidationResult, ValidationError};
pub use rules::{Constraint, Pattern, Rule};
pub use tree::ControlTree;
pub use validator::FormValidator;
pub use value::FieldValue;

/// Binds a validator to `container`
///
/// Fails with [`FormError::MissingForm`] when `container` is `None`.
pub fn form<T: ControlTree>(
    tree: T,
    container: Option<T::Node>,
    options: FormOptions,
) -> error::Result<FormValidator<T>> {
    FormValidator::new(tree, container, options)
}
