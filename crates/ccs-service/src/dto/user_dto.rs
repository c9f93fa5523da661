//! User-related DTOs.

use validator::Validate;

/// Name and email supplied when creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserDetails {
    #[validate(length(min = 1, message = "Parameter 'name' cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Parameter 'email' cannot be empty"))]
    pub email: String,
}

impl UserDetails {
    /// Creates a details DTO.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccs_core::{CcsError, ValidateExt};

    fn message(details: &UserDetails) -> String {
        match details.validate_request().unwrap_err() {
            CcsError::InvalidArgument(msg) => msg,
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_details() {
        assert!(UserDetails::new("n", "e@x.com").validate_request().is_ok());
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert!(UserDetails::new(" ", " ").validate_request().is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(message(&UserDetails::new("", "e@x.com")), "Parameter 'name' cannot be empty");
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(message(&UserDetails::new("n", "")), "Parameter 'email' cannot be empty");
    }

    #[test]
    fn test_both_empty_reports_both() {
        let msg = message(&UserDetails::new("", ""));
        assert!(msg.contains("'name'"));
        assert!(msg.contains("'email'"));
    }
}
