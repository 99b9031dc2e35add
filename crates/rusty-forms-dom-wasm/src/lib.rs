//! Rusty-Forms DOM WASM
//!
//! JavaScript bindings for `rusty-forms-dom`. The validator runs against
//! the live page through [`WebTree`].
//!
//! ```javascript
//! import init, { form } from './rusty_forms_dom_wasm.js';
//!
//! await init();
//! const signup = form(document.querySelector('#signup'));
//! signup.field('age').number().required().min(18, 'You must be an adult').max(100);
//! signup.field('interests').array().required().max(3);
//!
//! const { isValid, errors } = signup.validate();
//! ```

use wasm_bindgen::prelude::*;

mod handles;
mod tree;

pub use handles::{ArrayRules, FieldHandle, FormValidator, NumberRules, StringRules};
pub use tree::WebTree;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Binds a validator to `container`
///
/// `options` is an optional object such as
/// `{ requireLabels: false, defaultMessages: { valueMissing: "Required" } }`.
/// Throws when `container` is missing or `options` does not parse.
#[wasm_bindgen]
pub fn form(
    container: Option<web_sys::Element>,
    options: JsValue,
) -> Result<FormValidator, JsValue> {
    FormValidator::bind(container, options)
}
