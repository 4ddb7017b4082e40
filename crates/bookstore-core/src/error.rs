//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Book record validation failures                │
//! │  └── StoreError       - Key-value store collaborator failures          │
//! │                                                                         │
//! │  bookstore-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  bookstore-api errors                                                  │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog query and the cart reducer never fail: bad input is
//! normalized and lookup misses are no-ops. Only collaborators (storage,
//! database) produce errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found.
    ///
    /// ## When This Occurs
    /// - The client asks for a book id the catalog does not have
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used when seeding or inserting book records.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed ISBN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures of the key-value store collaborator.
///
/// ## Propagation
/// ```text
/// FileStore (disk) ──► StoreError ──► CartSession::dispatch ──► caller
/// ```
/// The session never swallows these; the in-memory cart stays
/// authoritative even when a write fails.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("Failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Writing a key failed.
    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },

    /// Cart could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a Read error for a key.
    pub fn read(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Read {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Write error for a key.
    pub fn write(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Write {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for key-value store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BookNotFound(42);
        assert_eq!(err.to_string(), "Book not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::TooLong {
            field: "author".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "author must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "isbn".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::write("cart", "disk full");
        assert_eq!(err.to_string(), "Failed to write 'cart': disk full");
    }
}
