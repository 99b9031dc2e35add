//! Constraint Reader
//!
//! Native constraint-validation state of a control and the fixed order in
//! which its violations are reported.

use serde::{Deserialize, Serialize};

use crate::tree::ControlTree;

/// One kind of native constraint violation
///
/// Variants are declared in reporting priority order, which matches the
/// order browsers use when picking a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Violation {
    ValueMissing,
    TypeMismatch,
    PatternMismatch,
    TooShort,
    TooLong,
    RangeUnderflow,
    RangeOverflow,
    StepMismatch,
    CustomError,
}

impl Violation {
    /// Every violation kind, highest priority first
    pub const ALL: [Violation; 9] = [
        Violation::ValueMissing,
        Violation::TypeMismatch,
        Violation::PatternMismatch,
        Violation::TooShort,
        Violation::TooLong,
        Violation::RangeUnderflow,
        Violation::RangeOverflow,
        Violation::StepMismatch,
        Violation::CustomError,
    ];

    /// Control attribute that may carry a message for this violation
    pub fn data_attribute(self) -> &'static str {
        match self {
            Violation::ValueMissing => "data-error-value-missing",
            Violation::TypeMismatch => "data-error-type-mismatch",
            Violation::PatternMismatch => "data-error-pattern-mismatch",
            Violation::TooShort => "data-error-too-short",
            Violation::TooLong => "data-error-too-long",
            Violation::RangeUnderflow => "data-error-range-underflow",
            Violation::RangeOverflow => "data-error-range-overflow",
            Violation::StepMismatch => "data-error-step-mismatch",
            Violation::CustomError => "data-error-custom-error",
        }
    }

    /// Message used when nothing more specific is configured
    pub fn fallback_message(self) -> &'static str {
        match self {
            Violation::ValueMissing => "Please fill out this field.",
            Violation::TypeMismatch => "Please enter a valid value.",
            Violation::PatternMismatch => "Please match the requested format.",
            Violation::TooShort => "Please lengthen this text.",
            Violation::TooLong => "Please shorten this text.",
            Violation::RangeUnderflow => "Value is too low.",
            Violation::RangeOverflow => "Value is too high.",
            Violation::StepMismatch => "Please enter a valid value.",
            Violation::CustomError => "Invalid value.",
        }
    }

    /// Parses the camelCase name used by the browser `ValidityState`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// camelCase name, as used by the browser `ValidityState`
    pub fn name(self) -> &'static str {
        match self {
            Violation::ValueMissing => "valueMissing",
            Violation::TypeMismatch => "typeMismatch",
            Violation::PatternMismatch => "patternMismatch",
            Violation::TooShort => "tooShort",
            Violation::TooLong => "tooLong",
            Violation::RangeUnderflow => "rangeUnderflow",
            Violation::RangeOverflow => "rangeOverflow",
            Violation::StepMismatch => "stepMismatch",
            Violation::CustomError => "customError",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Native validity flags of one control
///
/// The default value is the all-valid state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_short: bool,
    pub too_long: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub custom_error: bool,
}

impl ValidityState {
    pub fn is_set(&self, violation: Violation) -> bool {
        match violation {
            Violation::ValueMissing => self.value_missing,
            Violation::TypeMismatch => self.type_mismatch,
            Violation::PatternMismatch => self.pattern_mismatch,
            Violation::TooShort => self.too_short,
            Violation::TooLong => self.too_long,
            Violation::RangeUnderflow => self.range_underflow,
            Violation::RangeOverflow => self.range_overflow,
            Violation::StepMismatch => self.step_mismatch,
            Violation::CustomError => self.custom_error,
        }
    }

    pub fn valid(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Highest-priority violation that is set, if any
    pub fn first_violation(&self) -> Option<Violation> {
        Violation::ALL.into_iter().find(|v| self.is_set(*v))
    }
}

/// Reads a control's native validity
///
/// Controls without a constraint-validation API read as valid.
pub fn read_validity<T: ControlTree>(tree: &T, control: &T::Node) -> ValidityState {
    tree.validity(control).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let state = ValidityState::default();
        assert!(state.valid());
        assert_eq!(state.first_violation(), None);
    }

    #[test]
    fn test_priority_follows_browser_order() {
        let state = ValidityState {
            custom_error: true,
            range_overflow: true,
            pattern_mismatch: true,
            ..Default::default()
        };
        assert_eq!(state.first_violation(), Some(Violation::PatternMismatch));

        let state = ValidityState {
            step_mismatch: true,
            custom_error: true,
            ..Default::default()
        };
        assert_eq!(state.first_violation(), Some(Violation::StepMismatch));
    }

    #[test]
    fn test_names_round_trip() {
        for violation in Violation::ALL {
            assert_eq!(Violation::from_name(violation.name()), Some(violation));
        }
        assert_eq!(Violation::from_name("badInput"), None);
    }

    #[test]
    fn test_serde_uses_validity_state_names() {
        let json = serde_json::to_string(&Violation::RangeUnderflow).unwrap();
        assert_eq!(json, "\"rangeUnderflow\"");
        let parsed: Violation = serde_json::from_str("\"valueMissing\"").unwrap();
        assert_eq!(parsed, Violation::ValueMissing);
    }
}
