//! JS-facing handles
//!
//! JavaScript keeps `field()` and chain objects around between calls, so
//! every handle shares the validator through `Rc<RefCell<..>>` and looks its
//! record up by name on each call.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::RegExp;
use rusty_forms_dom::{
    ArrayChain, FieldRecord, FormError, FormOptions, NumberChain, Pattern, StringChain, Violation,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{console, Element};

use crate::tree::WebTree;

type Validator = rusty_forms_dom::FormValidator<WebTree>;

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Thrown as a JS `Error`
fn form_error(err: FormError) -> JsValue {
    js_error(&err.to_string())
}

/// Plain objects and arrays instead of `Map`s
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Validator bound to one form element
#[wasm_bindgen]
pub struct FormValidator {
    inner: Rc<RefCell<Validator>>,
}

impl FormValidator {
    pub(crate) fn bind(container: Option<Element>, options: JsValue) -> Result<Self, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            FormOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| js_error(&format!("Invalid form options: {}", e)))?
        };

        let validator =
            rusty_forms_dom::form(WebTree, container, options).map_err(form_error)?;
        for warning in validator.warnings() {
            console::warn_1(&JsValue::from_str(&warning.to_string()));
        }

        Ok(Self {
            inner: Rc::new(RefCell::new(validator)),
        })
    }

    /// Shared validator, for Rust callers
    pub fn inner(&self) -> &Rc<RefCell<Validator>> {
        &self.inner
    }
}

#[wasm_bindgen]
impl FormValidator {
    /// Rule handle for `name`; throws for names the form does not have
    pub fn field(&self, name: &str) -> Result<FieldHandle, JsValue> {
        self.inner
            .borrow_mut()
            .field(name)
            .map_err(form_error)?;
        Ok(FieldHandle {
            inner: Rc::clone(&self.inner),
            name: name.to_string(),
        })
    }

    /// Validates every field; returns `{ isValid, errors: [{ field, message }] }`
    pub fn validate(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().validate())
    }

    /// Validates one field; returns its error or `null`
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, name: &str) -> Result<JsValue, JsValue> {
        let error = self
            .inner
            .borrow()
            .validate_field(name)
            .map_err(form_error)?;
        match error {
            Some(error) => to_js(&error),
            None => Ok(JsValue::NULL),
        }
    }

    /// Field records keyed by name, in document order
    #[wasm_bindgen(js_name = getFields)]
    pub fn get_fields(&self) -> Result<JsValue, JsValue> {
        let fields = js_sys::Object::new();
        for (name, record) in self.inner.borrow().fields() {
            js_sys::Reflect::set(
                &fields,
                &JsValue::from_str(name),
                &to_js(&record.summary())?,
            )?;
        }
        Ok(fields.into())
    }

    /// Binder warnings, as display strings
    pub fn warnings(&self) -> Vec<String> {
        self.inner
            .borrow()
            .warnings()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Handle returned by `form.field(name)`
#[wasm_bindgen]
#[derive(Clone)]
pub struct FieldHandle {
    inner: Rc<RefCell<Validator>>,
    name: String,
}

impl FieldHandle {
    /// Runs `f` on the record; the name was checked when the handle was made
    fn with_record(&self, f: impl FnOnce(&mut FieldRecord<Element>)) {
        if let Some(record) = self.inner.borrow_mut().record_mut(&self.name) {
            f(record);
        }
    }
}

#[wasm_bindgen]
impl FieldHandle {
    pub fn string(&self) -> Result<StringRules, JsValue> {
        self.inner
            .borrow_mut()
            .field(&self.name)
            .map_err(form_error)?
            .string();
        Ok(StringRules {
            field: self.clone(),
        })
    }

    pub fn number(&self) -> Result<NumberRules, JsValue> {
        self.inner
            .borrow_mut()
            .field(&self.name)
            .map_err(form_error)?
            .number();
        Ok(NumberRules {
            field: self.clone(),
        })
    }

    pub fn array(&self) -> Result<ArrayRules, JsValue> {
        self.inner
            .borrow_mut()
            .field(&self.name)
            .map_err(form_error)?
            .array();
        Ok(ArrayRules {
            field: self.clone(),
        })
    }

    /// Overrides the message for a native violation, named as on the
    /// browser's `ValidityState` (`valueMissing`, `typeMismatch`, ...)
    pub fn message(&self, kind: &str, text: &str) -> Result<FieldHandle, JsValue> {
        let violation = Violation::from_name(kind)
            .ok_or_else(|| js_error(&format!("Unknown validity kind \"{}\"", kind)))?;
        self.inner
            .borrow_mut()
            .field(&self.name)
            .map_err(form_error)?
            .message(violation, text);
        Ok(self.clone())
    }
}

/// `pattern` rule backed by the caller's own `RegExp`
#[derive(Debug)]
struct JsPattern(RegExp);

impl Pattern for JsPattern {
    fn is_match(&self, text: &str) -> bool {
        // `g` and `y` regexes resume from `lastIndex`
        self.0.set_last_index(0);
        self.0.test(text)
    }

    fn source(&self) -> String {
        format!(
            "/{}/{}",
            String::from(self.0.source()),
            String::from(self.0.flags())
        )
    }
}

fn count(n: f64) -> usize {
    n.max(0.0) as usize
}

macro_rules! rule_handle {
    ($(#[$doc:meta])* $handle:ident, $chain:ident) => {
        $(#[$doc])*
        #[wasm_bindgen]
        #[derive(Clone)]
        pub struct $handle {
            field: FieldHandle,
        }

        impl $handle {
            /// Appends through a chain that keeps the field's current kind,
            /// so stale handles never re-tag it
            fn add(
                &self,
                message: Option<String>,
                push: impl FnOnce($chain<'_, Element>) -> $chain<'_, Element>,
            ) -> Self {
                self.field.with_record(|record| {
                    let chain = push($chain::resume(record));
                    if let Some(message) = message {
                        chain.message(message);
                    }
                });
                self.clone()
            }
        }

        #[wasm_bindgen]
        impl $handle {
            pub fn required(&self, message: Option<String>) -> $handle {
                self.add(message, |chain| chain.required())
            }
        }
    };
}

rule_handle!(
    /// String rules; lengths count characters
    StringRules,
    StringChain
);
rule_handle!(
    /// Number rules
    NumberRules,
    NumberChain
);
rule_handle!(
    /// Array rules; bounds count checked items
    ArrayRules,
    ArrayChain
);

#[wasm_bindgen]
impl StringRules {
    pub fn min(&self, len: f64, message: Option<String>) -> StringRules {
        self.add(message, |chain| chain.min(count(len)))
    }

    pub fn max(&self, len: f64, message: Option<String>) -> StringRules {
        self.add(message, |chain| chain.max(count(len)))
    }

    /// Matches with JavaScript's own regex engine
    pub fn pattern(&self, regex: &RegExp, message: Option<String>) -> StringRules {
        let pattern = JsPattern(regex.clone());
        self.add(message, |chain| chain.pattern(pattern))
    }

    pub fn email(&self, message: Option<String>) -> StringRules {
        self.add(message, |chain| chain.email())
    }
}

#[wasm_bindgen]
impl NumberRules {
    pub fn min(&self, min: f64, message: Option<String>) -> NumberRules {
        self.add(message, |chain| chain.min(min))
    }

    pub fn max(&self, max: f64, message: Option<String>) -> NumberRules {
        self.add(message, |chain| chain.max(max))
    }

    pub fn step(&self, step: f64, message: Option<String>) -> NumberRules {
        self.add(message, |chain| chain.step(step))
    }
}

#[wasm_bindgen]
impl ArrayRules {
    pub fn min(&self, items: f64, message: Option<String>) -> ArrayRules {
        self.add(message, |chain| chain.min(count(items)))
    }

    pub fn max(&self, items: f64, message: Option<String>) -> ArrayRules {
        self.add(message, |chain| chain.max(count(items)))
    }
}
