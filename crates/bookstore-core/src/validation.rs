//! # Validation Module
//!
//! Book record validation, applied before a record reaches the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Seed / insert (Rust)                                         │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (page_count >= 0, price_cents >= 0)                         │
//! │  └── UNIQUE (isbn)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog query parameters are NOT validated here: they are normalized
//! (see [`crate::catalog::PageRequest::normalize`]) and never rejected.

use crate::error::ValidationError;
use crate::types::Book;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of free-text book fields.
pub const MAX_TEXT_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required free-text field (title, author, publisher...).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ```rust
/// use bookstore_core::validation::validate_text;
///
/// assert!(validate_text("title", "Les Miserables").is_ok());
/// assert!(validate_text("title", "   ").is_err());
/// ```
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates an ISBN.
///
/// ## Rules
/// - Digits and hyphens only (a trailing `X` is allowed for ISBN-10)
/// - Exactly 10 or 13 significant characters once hyphens are removed
///
/// ```rust
/// use bookstore_core::validation::validate_isbn;
///
/// assert!(validate_isbn("978-0451419439").is_ok());
/// assert!(validate_isbn("0-306-40615-X").is_ok());
/// assert!(validate_isbn("978-04514").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    let isbn = isbn.trim();

    if isbn.is_empty() {
        return Err(ValidationError::Required {
            field: "isbn".to_string(),
        });
    }

    let significant: Vec<char> = isbn.chars().filter(|c| *c != '-').collect();
    let len = significant.len();

    let well_formed = significant.iter().enumerate().all(|(i, c)| {
        c.is_ascii_digit() || (len == 10 && i == 9 && (*c == 'X' || *c == 'x'))
    });

    if !well_formed || (len != 10 && len != 13) {
        return Err(ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: "must be 10 or 13 digits, optionally hyphenated".to_string(),
        });
    }

    Ok(())
}

/// Validates a page count (non-negative).
pub fn validate_page_count(pages: i64) -> ValidationResult<()> {
    if pages < 0 {
        return Err(ValidationError::OutOfRange {
            field: "page_count".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in cents (non-negative; zero is allowed).
///
/// ```rust
/// use bookstore_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validator
// =============================================================================

/// Validates every field of a book record, stopping at the first failure.
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    validate_text("title", &book.title)?;
    validate_text("author", &book.author)?;
    validate_text("publisher", &book.publisher)?;
    validate_text("classification", &book.classification)?;
    validate_text("category", &book.category)?;
    validate_isbn(&book.isbn)?;
    validate_page_count(book.page_count)?;
    validate_price_cents(book.price.cents())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
