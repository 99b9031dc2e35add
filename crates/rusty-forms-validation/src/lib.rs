//! Rusty-Forms-Validation Core
//!
//! Leaf predicates used by field rules. Every validator returns
//! `Result<(), String>` where the error is the default, human readable
//! message; callers substitute their own override when one is set.
//!
//! Compatible with both std and no_std (+ alloc) environments, except for
//! pattern matching which needs the `regex-validation` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod collection;
pub mod email;
pub mod numeric;
pub mod string;

// Re-export all validators
pub use collection::*;
pub use email::*;
pub use numeric::*;
pub use string::*;

/// Message reported when a value is required but empty
pub const REQUIRED_MESSAGE: &str = "This field is required";
