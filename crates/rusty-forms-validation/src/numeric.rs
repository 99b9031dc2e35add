//! Numeric validation functions

use alloc::format;
use alloc::string::String;

/// Message reported when text cannot be read as a number
pub const NOT_A_NUMBER_MESSAGE: &str = "Must be a number";

/// Parses user-entered text as a decimal number
///
/// Surrounding whitespace is ignored. Returns `None` for empty text and for
/// anything that is not a finite decimal literal (`"inf"` and `"NaN"`
/// included).
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let looks_numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validates minimum value for numeric types (inclusive)
pub fn validate_min<T: PartialOrd + core::fmt::Display>(value: T, min: T) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {}", min))
    }
}

/// Validates maximum value for numeric types (inclusive)
pub fn validate_max<T: PartialOrd + core::fmt::Display>(value: T, max: T) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {}", max))
    }
}

/// Validates that `value` is a whole multiple of `step`
///
/// Uses the exact floating-point remainder with no tolerance, so
/// non-integer steps such as `0.1` can reject values that look like
/// multiples in decimal (`0.3 % 0.1 != 0`). A zero step rejects everything.
pub fn validate_step(value: f64, step: f64) -> Result<(), String> {
    if value % step == 0.0 {
        Ok(())
    } else {
        Err(format!("Must be a multiple of {}", step))
    }
}
