//! # Domain Types
//!
//! The catalog record shared by every layer.
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │              Book               │
//! │  ─────────────────────────────  │
//! │  book_id (i64, stable)          │
//! │  title / author / publisher     │
//! │  isbn                           │
//! │  classification / category      │
//! │  page_count                     │
//! │  price (Money, decimal on wire) │
//! └─────────────────────────────────┘
//! ```
//!
//! Books are created by seeding and never mutated here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
///
/// ## Wire Format
/// ```json
/// {
///   "bookId": 1,
///   "title": "Les Miserables",
///   "author": "Victor Hugo",
///   "publisher": "Signet",
///   "isbn": "978-0451419439",
///   "classification": "Fiction",
///   "category": "Classic",
///   "pageCount": 1488,
///   "price": 9.95
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Book {
    /// Unique, stable identifier.
    pub book_id: i64,

    pub title: String,

    pub author: String,

    pub publisher: String,

    pub isbn: String,

    /// Fiction / Non-Fiction.
    pub classification: String,

    /// The value the category filter compares against.
    pub category: String,

    pub page_count: i64,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book {
            book_id: 1,
            title: "Les Miserables".to_string(),
            author: "Victor Hugo".to_string(),
            publisher: "Signet".to_string(),
            isbn: "978-0451419439".to_string(),
            classification: "Fiction".to_string(),
            category: "Classic".to_string(),
            page_count: 1488,
            price: Money::from_cents(995),
        }
    }

    #[test]
    fn test_book_serializes_camel_case_with_decimal_price() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["bookId"], 1);
        assert_eq!(json["pageCount"], 1488);
        assert_eq!(json["price"], 9.95);
        assert!(json.get("book_id").is_none());
    }

    #[test]
    fn test_book_deserializes_from_wire() {
        let json = r#"{
            "bookId": 1, "title": "Les Miserables", "author": "Victor Hugo",
            "publisher": "Signet", "isbn": "978-0451419439",
            "classification": "Fiction", "category": "Classic",
            "pageCount": 1488, "price": 9.95
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book, sample());
    }
}
