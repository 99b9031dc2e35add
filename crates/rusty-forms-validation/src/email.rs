//! Email validation functions

use alloc::string::String;

/// Permissive email check
///
/// Accepts `local@domain.tld` shapes: exactly one `@`, no whitespace
/// anywhere, a non-empty local part, and a domain holding a `.` with at
/// least one character on each side of it. Deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() {
        return false;
    }

    // Some '.' must split the domain into two non-empty halves
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validates an email address, returning the default message on failure
pub fn validate_email(email: &str) -> Result<(), String> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(String::from("Invalid email address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("üser@exämple.de"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_validate_email_message() {
        assert_eq!(validate_email("nope"), Err("Invalid email address".into()));
        assert!(validate_email("ok@example.org").is_ok());
    }
}
