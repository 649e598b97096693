//! # Validation
//!
//! Rules for the public contact form.

use crate::StoreError;
use serde::{Deserialize, Serialize};

const REQUIRED_FIELDS: &str = "All fields (name, email, message) are required.";

/// Maximum accepted message length in bytes.
pub const MAX_MESSAGE_LEN: usize = 10_000;

/// A contact inquiry as submitted by a visitor.
///
/// All fields are optional on the wire so that a missing field produces the
/// form's own error message instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Create a complete submission.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// Check required fields, email shape and message size.
    pub fn validate(&self) -> Result<(), StoreError> {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
        if !(filled(&self.name) && filled(&self.email) && filled(&self.message)) {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        }
        if let Some(email) = &self.email {
            validate_email(email.trim())?;
        }
        if self.message.as_deref().map_or(0, str::len) > MAX_MESSAGE_LEN {
            return Err(StoreError::Validation(format!(
                "message exceeds {MAX_MESSAGE_LEN} bytes"
            )));
        }
        Ok(())
    }
}

/// Check that `email` looks like a deliverable address.
///
/// This is a shape check only: one `@`, a non-empty local part and a dotted
/// domain, no whitespace, no leading or trailing dots on either side.
pub fn validate_email(email: &str) -> Result<(), StoreError> {
    let invalid = |reason: &str| {
        Err(StoreError::Validation(format!(
            "value is not a valid email address: {reason}"
        )))
    };

    if email.chars().any(char::is_whitespace) {
        return invalid("contains whitespace");
    }
    let Some((local, domain)) = email.split_once('@') else {
        return invalid("missing @");
    };
    if domain.contains('@') {
        return invalid("more than one @");
    }
    if local.is_empty() {
        return invalid("empty local part");
    }
    if local.starts_with('.') || local.ends_with('.') {
        return invalid("local part starts or ends with a dot");
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return invalid("domain must contain a dot between labels");
    }
    if domain.split('.').any(str::is_empty) {
        return invalid("empty domain label");
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
