//! Custom rules and their evaluation
//!
//! A rule is one call on a typed chain. It remembers the kind it was
//! declared under and is only evaluated while the field still has that
//! kind.

use std::fmt::Debug;
use std::rc::Rc;

use regex::Regex;
use rusty_forms_validation::{
    is_blank, validate_email, validate_max, validate_max_items, validate_max_length,
    validate_min, validate_min_items, validate_min_length, validate_pattern, validate_step,
    NOT_A_NUMBER_MESSAGE, PATTERN_MESSAGE, REQUIRED_MESSAGE,
};

use crate::field::FieldKind;
use crate::value::{FieldValue, NumberInput};

/// Text matcher behind a `pattern` rule
///
/// Implemented for [`Regex`]; hosts with their own regex engine (the
/// browser's `RegExp`) implement it to keep that engine's semantics.
pub trait Pattern: Debug {
    fn is_match(&self, text: &str) -> bool;

    /// Source as shown in field summaries
    fn source(&self) -> String;
}

impl Pattern for Regex {
    fn is_match(&self, text: &str) -> bool {
        validate_pattern(text, self).is_ok()
    }

    fn source(&self) -> String {
        self.as_str().to_string()
    }
}

/// What a rule checks
///
/// `Min`/`Max` compare character length for strings, the value for
/// numbers and the item count for arrays.
#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    Min(f64),
    Max(f64),
    Pattern(Rc<dyn Pattern>),
    Email,
    Step(f64),
}

impl Constraint {
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Pattern(_) => "pattern",
            Constraint::Email => "email",
            Constraint::Step(_) => "step",
        }
    }

    /// Comparison value rendered as text, if the constraint has one
    pub fn argument(&self) -> Option<String> {
        match self {
            Constraint::Min(n) | Constraint::Max(n) | Constraint::Step(n) => Some(n.to_string()),
            Constraint::Pattern(pattern) => Some(pattern.source()),
            Constraint::Required | Constraint::Email => None,
        }
    }
}

/// One declared validation rule
#[derive(Debug, Clone)]
pub struct Rule {
    constraint: Constraint,
    message: Option<String>,
    kind: FieldKind,
}

enum Failure {
    /// carries the rule's default message
    Rule(String),
    NotANumber,
}

impl Rule {
    pub fn new(kind: FieldKind, constraint: Constraint) -> Self {
        Self {
            constraint,
            message: None,
            kind,
        }
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Message override, if one was given
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Kind the rule was declared under
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Checks `value` coerced to the rule's kind, returning the message to
    /// report on failure
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        let outcome = match self.kind {
            FieldKind::String => self.check_text(&value.as_text()),
            FieldKind::Number => self.check_number(value.as_number()),
            FieldKind::Array => self.check_items(&value.as_items()),
        };
        outcome.map_err(|failure| match failure {
            Failure::Rule(default) => self.message.clone().unwrap_or(default),
            Failure::NotANumber => NOT_A_NUMBER_MESSAGE.to_string(),
        })
    }

    fn check_text(&self, text: &str) -> Result<(), Failure> {
        if let Constraint::Required = self.constraint {
            return if is_blank(text) {
                Err(Failure::Rule(REQUIRED_MESSAGE.to_string()))
            } else {
                Ok(())
            };
        }
        let result = match &self.constraint {
            Constraint::Min(len) => validate_min_length(text, *len as usize),
            Constraint::Max(len) => validate_max_length(text, *len as usize),
            Constraint::Pattern(pattern) if pattern.is_match(text) => Ok(()),
            Constraint::Pattern(_) => Err(PATTERN_MESSAGE.to_string()),
            Constraint::Email => validate_email(text),
            Constraint::Required | Constraint::Step(_) => Ok(()),
        };
        result.map_err(Failure::Rule)
    }

    fn check_number(&self, input: NumberInput) -> Result<(), Failure> {
        let n = match (input, &self.constraint) {
            (NumberInput::Empty, Constraint::Required) => {
                return Err(Failure::Rule(REQUIRED_MESSAGE.to_string()))
            }
            (_, Constraint::Required) | (NumberInput::Empty, _) => return Ok(()),
            (NumberInput::Invalid, _) => return Err(Failure::NotANumber),
            (NumberInput::Value(n), _) => n,
        };
        let result = match self.constraint {
            Constraint::Min(min) => validate_min(n, min),
            Constraint::Max(max) => validate_max(n, max),
            Constraint::Step(step) => validate_step(n, step),
            _ => Ok(()),
        };
        result.map_err(Failure::Rule)
    }

    fn check_items(&self, items: &[String]) -> Result<(), Failure> {
        let result = match self.constraint {
            Constraint::Required if items.is_empty() => Err(REQUIRED_MESSAGE.to_string()),
            Constraint::Min(min) => validate_min_items(items, min as usize),
            Constraint::Max(max) => validate_max_items(items, max as usize),
            _ => Ok(()),
        };
        result.map_err(Failure::Rule)
    }
}

/// Message of the first failing rule, stopping there
pub fn first_failure<'a>(
    rules: impl IntoIterator<Item = &'a Rule>,
    value: &FieldValue,
) -> Option<String> {
    rules.into_iter().find_map(|rule| rule.check(value).err())
}
