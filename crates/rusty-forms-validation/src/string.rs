//! String validation functions
//!
//! Lengths are counted in characters, not bytes, so `"héllo"` has length 5.

use alloc::format;
use alloc::string::String;

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validates minimum string length (inclusive)
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if char_len(s) >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {} characters", min))
    }
}

/// Validates maximum string length (inclusive)
pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if char_len(s) <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {} characters", max))
    }
}

/// Checks that a value is blank once surrounding whitespace is removed
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Message reported when a value does not match a `pattern` rule
pub const PATTERN_MESSAGE: &str = "Invalid format";

/// Regex pattern matching
///
/// The pattern is searched for anywhere in the value; anchor it with `^`/`$`
/// to require a full match.
#[cfg(feature = "regex-validation")]
pub fn validate_pattern(value: &str, pattern: &regex::Regex) -> Result<(), String> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(String::from(PATTERN_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", 3, true)]
    #[case("abc", 3, true)]
    #[case("hi", 3, false)]
    #[case("", 1, false)]
    #[case("héé", 3, true)]
    fn test_min_length(#[case] value: &str, #[case] min: usize, #[case] ok: bool) {
        assert_eq!(validate_min_length(value, min).is_ok(), ok);
    }

    #[test]
    fn test_max_length() {
        assert!(validate_max_length("hello", 10).is_ok());
        assert!(validate_max_length("hello", 5).is_ok());
        assert_eq!(
            validate_max_length("verylongstring", 5),
            Err("Must be at most 5 characters".into())
        );
        // four characters, eight bytes
        assert!(validate_max_length("ßßßß", 4).is_ok());
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }

    #[cfg(feature = "regex-validation")]
    #[test]
    fn test_pattern() {
        let zip = regex::Regex::new(r"^\d{5}$").unwrap();
        assert!(validate_pattern("12345", &zip).is_ok());
        assert_eq!(
            validate_pattern("1234a", &zip),
            Err("Invalid format".into())
        );

        let unanchored = regex::Regex::new(r"\d").unwrap();
        assert!(validate_pattern("abc1", &unanchored).is_ok());
    }
}
