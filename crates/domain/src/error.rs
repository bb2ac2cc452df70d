//! Unified error types for the domain layer
//!
//! Provides a common error type for payload validation, directive construction,
//! and enum parsing, so adapters never have to fall back to strings or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a required field is empty)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for enums and value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A source span does not describe a non-empty range of the text
    #[error("Invalid span: {start}..{end}")]
    InvalidSpan { start: usize, end: usize },
}

impl DomainError {
    /// Creates a validation error for payload invariants.
    ///
    /// Use this when a payload or catalog entry breaks a rule the formatter
    /// relies on:
    /// - Required text fields are empty
    /// - Numeric fields are outside the ranges the game rules allow
    /// - Collections that need at least one element are empty
    ///
    /// # Example
    /// ```ignore
    /// if monster.actions.is_empty() {
    ///     return Err(DomainError::validation("monster needs at least one action"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid span error
    pub fn invalid_span(start: usize, end: usize) -> Self {
        Self::InvalidSpan { start, end }
    }
}
