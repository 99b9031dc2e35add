//! Shared fixtures for the integration tests
//!
//! Builds the equivalent of:
//!
//! ```html
//! <form>
//!   <label for="name">Name</label>
//!   <input id="name" name="name" required>
//!   <span role="alert"></span>
//!
//!   <div data-error-container>
//!     <label>Age <input name="age" type="number"></label>
//!     <span role="alert"></span>
//!   </div>
//!
//!   <fieldset>
//!     <legend>Interests</legend>
//!     <label><input type="checkbox" name="interests" value="rust"> Rust</label>
//!     ... go, zig, c
//!   </fieldset>
//!   <div role="alert"></div>
//!
//!   <fieldset data-error-container>
//!     <label><input type="radio" name="plan" value="free"> Free</label>
//!     <label><input type="radio" name="plan" value="pro"> Pro</label>
//!     <p role="alert"></p>
//!   </fieldset>
//!
//!   <input name="email" type="email">
//!   <input type="submit">
//! </form>
//! ```

#![allow(dead_code)]

use rusty_forms_dom::{MemoryDocument, NodeId};

pub struct SignupForm {
    pub doc: MemoryDocument,
    pub form: NodeId,
    pub name: NodeId,
    pub name_label: NodeId,
    pub name_alert: NodeId,
    pub age: NodeId,
    pub age_label: NodeId,
    pub age_alert: NodeId,
    pub interests: Vec<NodeId>,
    pub interests_alert: NodeId,
    pub plan: Vec<NodeId>,
    pub plan_alert: NodeId,
    pub email: NodeId,
    pub submit: NodeId,
}

impl SignupForm {
    pub fn new() -> Self {
        let doc = MemoryDocument::new();
        let form = doc.append(doc.root(), "form", &[("id", "signup")]);

        let name_label = doc.append_text(form, "label", &[("for", "name")], "Name");
        let name = doc.append(
            form,
            "input",
            &[("id", "name"), ("name", "name"), ("required", "")],
        );
        let name_alert = doc.append(form, "span", &[("role", "alert")]);

        let age_wrap = doc.append(form, "div", &[("data-error-container", "")]);
        let age_label = doc.append_text(age_wrap, "label", &[], "Age");
        let age = doc.append(age_label, "input", &[("name", "age"), ("type", "number")]);
        let age_alert = doc.append(age_wrap, "span", &[("role", "alert")]);

        let interests_set = doc.append(form, "fieldset", &[]);
        doc.append_text(interests_set, "legend", &[], "Interests");
        let interests = ["rust", "go", "zig", "c"]
            .iter()
            .map(|value| {
                let label = doc.append(interests_set, "label", &[]);
                doc.append(
                    label,
                    "input",
                    &[
                        ("type", "checkbox"),
                        ("name", "interests"),
                        ("value", *value),
                    ],
                )
            })
            .collect();
        let interests_alert = doc.append(form, "div", &[("role", "alert")]);

        let plan_set = doc.append(form, "fieldset", &[("data-error-container", "")]);
        let plan = ["free", "pro"]
            .iter()
            .map(|value| {
                let label = doc.append(plan_set, "label", &[]);
                doc.append(
                    label,
                    "input",
                    &[("type", "radio"), ("name", "plan"), ("value", *value)],
                )
            })
            .collect();
        let plan_alert = doc.append(plan_set, "p", &[("role", "alert")]);

        let email = doc.append(form, "input", &[("name", "email"), ("type", "email")]);
        let submit = doc.append(form, "input", &[("type", "submit")]);

        Self {
            doc,
            form,
            name,
            name_label,
            name_alert,
            age,
            age_label,
            age_alert,
            interests,
            interests_alert,
            plan,
            plan_alert,
            email,
            submit,
        }
    }
}

/// Routes `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
