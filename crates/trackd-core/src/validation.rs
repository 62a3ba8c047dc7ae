//! Validation helpers for trackd.
//!
//! Presence checks only: required fields must be non-blank. Structured
//! errors are returned without touching storage.

use crate::error::{FieldError, Result, TrackError};
use crate::model::NewIssue;

/// Validates issue and comment inputs.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a creation payload and return all errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<FieldError>` if any required field is blank.
    pub fn validate_new(issue: &NewIssue) -> std::result::Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if issue.title.trim().is_empty() {
            errors.push(FieldError::new("title", "cannot be empty"));
        }
        if issue.description.trim().is_empty() {
            errors.push(FieldError::new("description", "cannot be empty"));
        }
        if issue.assigned_to.trim().is_empty() {
            errors.push(FieldError::new("assignedTo", "cannot be empty"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate comment input, returning the trimmed text and author.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if text or author trims to empty.
    pub fn validate_comment<'a>(text: &'a str, author: &'a str) -> Result<(&'a str, &'a str)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TrackError::validation("text", "comment text is required"));
        }
        let author = author.trim();
        if author.is_empty() {
            return Err(TrackError::validation("author", "author name is required"));
        }
        Ok((text, author))
    }
}
