//! # Travel Workflow Errors
//!
//! The error taxonomy for the core workflow. Business-rule violations are
//! reported to the caller with a human-readable message and are never
//! retried; storage failures propagate as infrastructure errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for travel workflow operations
pub type TravelResult<T> = Result<T, TravelError>;

/// Field-keyed validation message sets
///
/// Malformed input is surfaced as a structured error per field, never
/// silently coerced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a result: `Ok(())` when no messages were recorded
    pub fn into_result(self) -> TravelResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TravelError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Travel workflow errors
#[derive(Debug, Clone, Error)]
pub enum TravelError {
    /// Unknown id, or id exists but the caller lacks ownership
    /// (deliberately indistinguishable)
    #[error("Travel request not found")]
    NotFound,

    /// Malformed input, with field-level messages
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Terminal-state or other business-rule violation
    #[error("{0}")]
    BusinessRule(String),

    /// Authenticated but not permitted to perform this transition
    #[error("This action is not permitted for your role")]
    Forbidden,

    /// Store unavailable; transition not applied, safe to retry
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TravelError {
    /// Returns the HTTP status code for this error
    ///
    /// Terminal-state violations map to 409 Conflict. The original system
    /// reported them as 500; this is a deliberate correction, with the
    /// business message preserved.
    pub fn status_code(&self) -> u16 {
        match self {
            TravelError::NotFound => 404,
            TravelError::Validation(_) => 422,
            TravelError::BusinessRule(_) => 409,
            TravelError::Forbidden => 403,
            TravelError::Storage(_) => 500,
        }
    }
}
