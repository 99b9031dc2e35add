//! Evaluator
//!
//! [`FormValidator`] owns the field registry for one form. `validate()`
//! walks it in order, merges the native constraint error with the first
//! failing custom rule, and writes the outcome back to the page.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::binder::{bind, BindWarning};
use crate::chain::FieldChain;
use crate::config::FormOptions;
use crate::constraint::{read_validity, Violation};
use crate::error::{FormError, Result};
use crate::field::FieldRecord;
use crate::result::{FormValidationResult, ValidationError};
use crate::rules::first_failure;
use crate::tree::ControlTree;
use crate::value::extract_value;

/// Validator bound to one form
pub struct FormValidator<T: ControlTree> {
    tree: T,
    form: T::Node,
    options: FormOptions,
    fields: IndexMap<String, FieldRecord<T::Node>>,
    warnings: Vec<BindWarning>,
}

impl<T: ControlTree> std::fmt::Debug for FormValidator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("warnings", &self.warnings)
            .finish()
    }
}

impl<T: ControlTree> FormValidator<T> {
    /// Binds every named control under `form`
    ///
    /// Fails only when `form` is `None`.
    pub fn new(tree: T, form: Option<T::Node>, options: FormOptions) -> Result<Self> {
        let form = form.ok_or(FormError::MissingForm)?;
        let binding = bind(&tree, &form, &options);
        Ok(Self {
            tree,
            form,
            options,
            fields: binding.fields,
            warnings: binding.warnings,
        })
    }

    /// Rule chain for `name`
    pub fn field(&mut self, name: &str) -> Result<FieldChain<'_, T::Node>> {
        self.fields
            .get_mut(name)
            .map(FieldChain::new)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Mutable record for `name`, for hosts that keep their own chain handles
    pub fn record_mut(&mut self, name: &str) -> Option<&mut FieldRecord<T::Node>> {
        self.fields.get_mut(name)
    }

    /// Field registry, in document order
    pub fn fields(&self) -> &IndexMap<String, FieldRecord<T::Node>> {
        &self.fields
    }

    /// Conventions the binder found unmet
    pub fn warnings(&self) -> &[BindWarning] {
        &self.warnings
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn form(&self) -> &T::Node {
        &self.form
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Validates every field and updates its error display
    pub fn validate(&self) -> FormValidationResult {
        let errors: Vec<ValidationError> = self
            .fields
            .values()
            .filter_map(|record| self.apply(record))
            .collect();

        debug!(
            fields = self.fields.len(),
            errors = errors.len(),
            "validated form"
        );
        FormValidationResult::from_errors(errors)
    }

    /// Validates a single field and updates its error display
    pub fn validate_field(&self, name: &str) -> Result<Option<ValidationError>> {
        let record = self
            .fields
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        Ok(self.apply(record))
    }

    /// Evaluates `record` and writes the outcome to the page
    fn apply(&self, record: &FieldRecord<T::Node>) -> Option<ValidationError> {
        let message = self.evaluate(record);
        match &message {
            Some(message) => self.show_error(record, message),
            None => self.clear_error(record),
        }
        trace!(field = record.name(), error = ?message, "field evaluated");
        message.map(|message| ValidationError::new(record.name(), message))
    }

    /// Message to report for `record`, native before custom
    fn evaluate(&self, record: &FieldRecord<T::Node>) -> Option<String> {
        let mut messages = Vec::with_capacity(2);

        if let Some(message) = self.native_message(record) {
            messages.push(message);
        }

        // custom rules run even when the native check already failed
        let value = extract_value(&self.tree, record);
        if let Some(message) = first_failure(record.active_rules(), &value) {
            messages.push(message);
        }

        messages.into_iter().next()
    }

    fn native_message(&self, record: &FieldRecord<T::Node>) -> Option<String> {
        let control = record.control();
        let violation = read_validity(&self.tree, control).first_violation()?;

        record
            .messages()
            .get(&violation)
            .filter(|message| !message.is_empty())
            .cloned()
            .or_else(|| {
                self.options
                    .default_messages
                    .get(&violation)
                    .filter(|message| !message.is_empty())
                    .cloned()
            })
            .or_else(|| {
                self.tree
                    .attribute(control, violation.data_attribute())
                    .filter(|message| !message.is_empty())
            })
            .or_else(|| match violation {
                Violation::CustomError => self
                    .tree
                    .validation_message(control)
                    .filter(|message| !message.is_empty()),
                _ => None,
            })
            .or_else(|| Some(violation.fallback_message().to_string()))
    }

    fn show_error(&self, record: &FieldRecord<T::Node>, message: &str) {
        if let Some(element) = record.error_element() {
            self.tree.set_text(element, message);
            self.tree.set_style(element, "visibility", "visible");
        }
        self.tree.set_attribute(record.control(), "aria-invalid", "true");
    }

    fn clear_error(&self, record: &FieldRecord<T::Node>) {
        if let Some(element) = record.error_element() {
            self.tree.set_text(element, "");
            // hidden, not removed, so the layout keeps its space
            self.tree.set_style(element, "visibility", "hidden");
        }
        self.tree.remove_attribute(record.control(), "aria-invalid");
    }
}
