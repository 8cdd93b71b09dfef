//! Error types for the Payroll Formula Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the formula engine and payroll recorder can report.
//! Each variant renders a distinct message so a caller can tell the user
//! exactly what to fix before resubmitting.

use thiserror::Error;

/// The main error type for the Payroll Formula Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee".to_string(),
///     key: "E-404".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: E-404");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// User input was malformed before any external call was made.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The formula text does not conform to the formula grammar.
    #[error("Malformed formula at position {position}: {message}")]
    Syntax {
        /// Byte offset into the formula text where the problem was found.
        position: usize,
        /// A description of the problem.
        message: String,
    },

    /// Evaluation divided by a zero denominator.
    #[error("Division by zero while evaluating formula")]
    DivisionByZero,

    /// A referenced employee, category or payroll record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: String,
        /// The key the lookup used.
        key: String,
    },

    /// The document store was unreachable or rejected a read or write.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the store failure.
        message: String,
    },

    /// A document store call did not complete within the bounded wait.
    #[error("Store operation '{operation}' on '{collection}' timed out after {timeout_ms}ms")]
    Timeout {
        /// The store operation that timed out.
        operation: String,
        /// The collection the operation targeted.
        collection: String,
        /// The configured bound, in milliseconds.
        timeout_ms: u64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`EngineError::NotFound`] for the given entity and key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
