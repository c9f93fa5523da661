//! Validation utilities.

use crate::CcsError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `CcsError` on failure.
    fn validate_request(&self) -> Result<(), CcsError> {
        self.validate().map_err(validation_errors_to_ccs_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to [`CcsError::InvalidArgument`].
///
/// Messages are ordered by field name so the resulting text is stable.
#[must_use]
pub fn validation_errors_to_ccs_error(errors: ValidationErrors) -> CcsError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{}: {}", field, error.code), |m| m.to_string());
                ((*field).to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ");

    CcsError::InvalidArgument(message)
}
