// File: src/error.rs
// Purpose: Fatal errors raised by the form validator

use thiserror::Error;

/// Errors that stop a validator call
///
/// Everything else (missing labels, missing error containers, bad numeric
/// input) is reported through warnings or the validation result instead.
#[derive(Debug, Error)]
pub enum FormError {
    /// The validator was constructed without a form container
    #[error("form container is missing; pass the form element to validate")]
    MissingForm,

    /// A rule chain was requested for a name the binder never discovered
    #[error("field \"{0}\" does not exist in this form (no control has name=\"{0}\")")]
    UnknownField(String),

    /// Options could not be parsed
    #[error("invalid form options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
