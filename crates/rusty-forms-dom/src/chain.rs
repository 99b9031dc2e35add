//! Rule Builder
//!
//! `FormValidator::field` hands out a [`FieldChain`]; its type selectors
//! tag the field and return a typed chain whose methods append rules.
//!
//! ```ignore
//! validator.field("age")?.number().required().min(18.0).message("Adults only").max(100.0);
//! ```
//!
//! Calling a different selector later re-tags the field. Rules declared
//! under the old kind stay in the record but are no longer evaluated.

use std::rc::Rc;

use crate::constraint::Violation;
use crate::field::{FieldKind, FieldRecord};
use crate::rules::{Constraint, Pattern, Rule};

/// Untyped handle on one field
pub struct FieldChain<'a, N> {
    record: &'a mut FieldRecord<N>,
}

impl<'a, N> FieldChain<'a, N> {
    pub(crate) fn new(record: &'a mut FieldRecord<N>) -> Self {
        Self { record }
    }

    pub fn string(self) -> StringChain<'a, N> {
        self.record.set_kind(FieldKind::String);
        StringChain::resume(self.record)
    }

    pub fn number(self) -> NumberChain<'a, N> {
        self.record.set_kind(FieldKind::Number);
        NumberChain::resume(self.record)
    }

    pub fn array(self) -> ArrayChain<'a, N> {
        self.record.set_kind(FieldKind::Array);
        ArrayChain::resume(self.record)
    }

    /// Overrides the message shown for a native `violation` on this field
    pub fn message(self, violation: Violation, message: impl Into<String>) -> Self {
        self.record.set_message(violation, message.into());
        self
    }

    pub fn record(&self) -> &FieldRecord<N> {
        self.record
    }
}

macro_rules! typed_chain {
    ($(#[$doc:meta])* $chain:ident, $kind:expr) => {
        $(#[$doc])*
        pub struct $chain<'a, N> {
            record: &'a mut FieldRecord<N>,
        }

        impl<'a, N> $chain<'a, N> {
            /// Continues appending to `record` without touching its kind
            pub fn resume(record: &'a mut FieldRecord<N>) -> Self {
                Self { record }
            }

            fn push(self, constraint: Constraint) -> Self {
                self.record.push_rule(Rule::new($kind, constraint));
                self
            }

            /// Overrides the message of the most recently added rule
            pub fn message(self, message: impl Into<String>) -> Self {
                if let Some(rule) = self.record.last_rule_mut() {
                    rule.set_message(message.into());
                }
                self
            }

            pub fn required(self) -> Self {
                self.push(Constraint::Required)
            }

            pub fn record(&self) -> &FieldRecord<N> {
                self.record
            }
        }
    };
}

typed_chain!(
    /// Rules for text values; `min`/`max` count characters
    StringChain,
    FieldKind::String
);
typed_chain!(
    /// Rules for numeric values
    NumberChain,
    FieldKind::Number
);
typed_chain!(
    /// Rules for multi-valued fields; `min`/`max` count items
    ArrayChain,
    FieldKind::Array
);

impl<'a, N> StringChain<'a, N> {
    pub fn min(self, len: usize) -> Self {
        self.push(Constraint::Min(len as f64))
    }

    pub fn max(self, len: usize) -> Self {
        self.push(Constraint::Max(len as f64))
    }

    /// Fails when `pattern` does not match; a [`Regex`](regex::Regex)
    /// searches anywhere in the value unless anchored
    pub fn pattern(self, pattern: impl Pattern + 'static) -> Self {
        self.push(Constraint::Pattern(Rc::new(pattern)))
    }

    pub fn email(self) -> Self {
        self.push(Constraint::Email)
    }
}

impl<'a, N> NumberChain<'a, N> {
    pub fn min(self, min: f64) -> Self {
        self.push(Constraint::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.push(Constraint::Max(max))
    }

    pub fn step(self, step: f64) -> Self {
        self.push(Constraint::Step(step))
    }
}

impl<'a, N> ArrayChain<'a, N> {
    pub fn min(self, count: usize) -> Self {
        self.push(Constraint::Min(count as f64))
    }

    pub fn max(self, count: usize) -> Self {
        self.push(Constraint::Max(count as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ControlKind;

    fn record() -> FieldRecord<u32> {
        FieldRecord::new("age".into(), vec![1], ControlKind::Single, None, None).unwrap()
    }

    #[test]
    fn test_chain_appends_in_order() {
        let mut record = record();
        FieldChain::new(&mut record)
            .number()
            .required()
            .min(18.0)
            .message("Adults only")
            .max(100.0);

        assert_eq!(record.kind(), Some(FieldKind::Number));
        let names: Vec<_> = record
            .rules()
            .iter()
            .map(|r| r.constraint().name())
            .collect();
        assert_eq!(names, vec!["required", "min", "max"]);
        assert_eq!(record.rules()[1].message(), Some("Adults only"));
        assert_eq!(record.rules()[2].message(), None);
    }

    #[test]
    fn test_retagging_leaves_old_rules_inert() {
        let mut record = record();
        FieldChain::new(&mut record).string().required().min(2);
        FieldChain::new(&mut record).number().max(5.0);

        assert_eq!(record.kind(), Some(FieldKind::Number));
        assert_eq!(record.rules().len(), 3);
        let active: Vec<_> = record
            .active_rules()
            .map(|r| r.constraint().name())
            .collect();
        assert_eq!(active, vec!["max"]);
    }

    #[test]
    fn test_resume_keeps_kind() {
        let mut record = record();
        FieldChain::new(&mut record).array();
        StringChain::resume(&mut record).email();

        assert_eq!(record.kind(), Some(FieldKind::Array));
        assert_eq!(record.rules()[0].kind(), FieldKind::String);
        assert_eq!(record.active_rules().count(), 0);
    }

    #[test]
    fn test_native_message_override() {
        let mut record = record();
        FieldChain::new(&mut record).message(Violation::ValueMissing, "Tell us your age");
        assert_eq!(
            record
                .messages()
                .get(&Violation::ValueMissing)
                .map(String::as_str),
            Some("Tell us your age")
        );
    }
}
