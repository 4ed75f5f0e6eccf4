//! Error types for `civic-core`.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Status;
use crate::policy::Role;
use crate::submit::SubmitError;

/// Primary error type for civic-core operations.
#[derive(Error, Debug)]
pub enum CivicError {
    // === Issue Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Lifecycle Errors ===
    /// The status machine has no edge between the two states.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: Status, to: Status },

    /// The edge exists but the role may not take it.
    #[error("Role '{role}' may not move an issue from {from} to {to}")]
    PermissionDenied { role: Role, from: Status, to: Status },

    /// Citizen verification actions need a pending verification record.
    #[error("Issue {id} has no pending citizen verification")]
    VerificationNotPending { id: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", join_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    /// A report was submitted without a map location.
    #[error("Please select a location on the map")]
    MissingLocation,

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid category value.
    #[error("Invalid category: {category}")]
    InvalidCategory { category: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    /// Invalid citizen verification status.
    #[error("Invalid verification status: {status}")]
    InvalidVerificationStatus { status: String },

    /// Invalid role tag.
    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    // === Submission Errors ===
    /// A report could not be handed over, even after retries.
    #[error("Failed to submit report. Please try again.")]
    SubmissionFailed {
        attempts: u32,
        #[source]
        source: SubmitError,
    },

    // === JSONL Errors ===
    /// Failed to parse a line in a JSONL dataset.
    #[error("JSONL parse error at line {line}: {reason}")]
    JsonlParse { line: usize, reason: String },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CivicError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for errors the user fixes by editing the report form.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::ValidationErrors { .. } | Self::MissingLocation
        )
    }
}

/// Result type using `CivicError`.
pub type Result<T> = std::result::Result<T, CivicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_validation_error_collapses() {
        let err = CivicError::from_validation_errors(vec![ValidationError::new(
            "title",
            "cannot be empty",
        )]);
        assert!(matches!(err, CivicError::Validation { ref field, .. } if field == "title"));
        assert_eq!(err.to_string(), "Validation failed: title: cannot be empty");
    }

    #[test]
    fn test_multiple_validation_errors_kept() {
        let err = CivicError::from_validation_errors(vec![
            ValidationError::new("title", "cannot be empty"),
            ValidationError::new("reporter.email", "cannot be empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation errors: title: cannot be empty; reporter.email: cannot be empty"
        );
        match err {
            CivicError::ValidationErrors { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_submission_failure_keeps_cause() {
        let err = CivicError::SubmissionFailed {
            attempts: 3,
            source: SubmitError::Unavailable("503".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to submit report. Please try again.");
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "service unavailable: 503");
    }

    #[test]
    fn test_transition_error_message() {
        let err = CivicError::InvalidTransition {
            from: Status::Closed,
            to: Status::InProgress,
        };
        assert_eq!(err.to_string(), "Invalid transition: closed -> in-progress");
        assert!(!err.is_user_input());
        assert!(CivicError::MissingLocation.is_user_input());
    }
}
