//! Collection validation functions

use alloc::format;
use alloc::string::String;

/// Validates minimum number of items in a collection (inclusive)
pub fn validate_min_items<T>(items: &[T], min: usize) -> Result<(), String> {
    if items.len() >= min {
        Ok(())
    } else {
        Err(format!("Must have at least {} items", min))
    }
}

/// Validates maximum number of items in a collection (inclusive)
pub fn validate_max_items<T>(items: &[T], max: usize) -> Result<(), String> {
    if items.len() <= max {
        Ok(())
    } else {
        Err(format!("Must have at most {} items", max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_min_items() {
        let items = vec!["a", "b", "c"];
        assert!(validate_min_items(&items, 2).is_ok());
        assert!(validate_min_items(&items, 3).is_ok());
        assert_eq!(
            validate_min_items(&items, 5),
            Err("Must have at least 5 items".into())
        );
        assert!(validate_min_items::<&str>(&[], 1).is_err());
    }

    #[test]
    fn test_max_items() {
        let items = vec![1, 2, 3];
        assert!(validate_max_items(&items, 5).is_ok());
        assert!(validate_max_items(&items, 3).is_ok());
        assert!(validate_max_items(&items, 2).is_err());
    }
}
