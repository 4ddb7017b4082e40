//! # Book Repository
//!
//! Database operations for the catalog.
//!
//! ## Paged Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              PageRequest { page: 2, page_size: 5, sort: title }         │
//! │                                                                         │
//! │  1. SELECT COUNT(*) FROM books WHERE (?1 IS NULL OR category = ?1)     │
//! │       └── total (filtered, before slicing)                             │
//! │                                                                         │
//! │  2. SELECT ... FROM books                                               │
//! │     WHERE (?1 IS NULL OR category = ?1)                                │
//! │     ORDER BY title COLLATE BINARY, book_id   ← sort=title              │
//! │           or book_id                          ← no sort                 │
//! │     LIMIT 5 OFFSET 5                                                   │
//! │       └── books                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ordering matches `bookstore_core::catalog::query` over the table in
//! `book_id` order: ordinal title comparison with ties kept in natural
//! order.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use bookstore_core::catalog::{PageRequest, PageResult, SortKey};
use bookstore_core::validation::validate_book;
use bookstore_core::{Book, Money};

use crate::error::{DbError, DbResult};

/// Columns selected for every book query.
const BOOK_COLUMNS: &str = "book_id, title, author, publisher, isbn, classification, \
                            category, page_count, price_cents";

/// Shared by the COUNT and the page query so both see the same rows.
const CATEGORY_FILTER: &str = "(?1 IS NULL OR category = ?1)";

// =============================================================================
// Row Mapping
// =============================================================================

/// A `books` row as stored (price in integer cents).
#[derive(Debug, FromRow)]
struct BookRow {
    book_id: i64,
    title: String,
    author: String,
    publisher: String,
    isbn: String,
    classification: String,
    category: String,
    page_count: i64,
    price_cents: i64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            book_id: row.book_id,
            title: row.title,
            author: row.author,
            publisher: row.publisher,
            isbn: row.isbn,
            classification: row.classification,
            category: row.category,
            page_count: row.page_count,
            price: Money::from_cents(row.price_cents),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BookRepository::new(pool);
///
/// let page = repo.page(&PageRequest::new(1, 10)).await?;
/// let book = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Returns one page of the catalog and the filtered total.
    ///
    /// ## Arguments
    /// * `request` - Already-normalized page request (page ≥ 1, size ≥ 1)
    ///
    /// ## Returns
    /// A page past the end yields `books: []` with the real `total`.
    pub async fn page(&self, request: &PageRequest) -> DbResult<PageResult> {
        let category = request.category();

        debug!(
            page = request.page(),
            page_size = request.page_size(),
            sort = request.sort().map(|s| s.as_str()),
            category = ?category,
            "Querying book page"
        );

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM books WHERE {CATEGORY_FILTER}"
        ))
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        let order_by = match request.sort() {
            Some(SortKey::Title) => "title COLLATE BINARY, book_id",
            None => "book_id",
        };

        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE {CATEGORY_FILTER} \
             ORDER BY {order_by} LIMIT ?2 OFFSET ?3"
        );

        // SQLite integers are i64; offsets beyond that cannot match any row.
        let limit = i64::from(request.page_size());
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let rows: Vec<BookRow> = sqlx::query_as(&sql)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(total, returned = rows.len(), "Book page loaded");

        Ok(PageResult {
            total: u64::try_from(total).unwrap_or(0),
            books: rows.into_iter().map(Book::from).collect(),
        })
    }

    /// Gets a book by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, book_id: i64) -> DbResult<Option<Book>> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = ?1"))
                .bind(book_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Book::from))
    }

    /// Lists the distinct categories, sorted ordinally.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM books ORDER BY category COLLATE BINARY",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Inserts a book, assigning a fresh `book_id`.
    ///
    /// The incoming `book_id` is ignored.
    ///
    /// ## Returns
    /// * `Ok(Book)` - The stored book with its assigned id
    /// * `Err(DbError::Invalid)` - Field validation failed
    /// * `Err(DbError::UniqueViolation)` - ISBN already exists
    pub async fn insert(&self, book: &Book) -> DbResult<Book> {
        validate_book(book)?;

        debug!(isbn = %book.isbn, title = %book.title, "Inserting book");

        let result = sqlx::query(
            r#"
            INSERT INTO books (
                title, author, publisher, isbn, classification,
                category, page_count, price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(book.title.trim())
        .bind(book.author.trim())
        .bind(book.publisher.trim())
        .bind(book.isbn.trim())
        .bind(book.classification.trim())
        .bind(book.category.trim())
        .bind(book.page_count)
        .bind(book.price.cents())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, book.isbn.trim()),
            other => other,
        })?;

        let book_id = result.last_insert_rowid();

        Ok(Book {
            book_id,
            title: book.title.trim().to_string(),
            author: book.author.trim().to_string(),
            publisher: book.publisher.trim().to_string(),
            isbn: book.isbn.trim().to_string(),
            classification: book.classification.trim().to_string(),
            category: book.category.trim().to_string(),
            page_count: book.page_count,
            price: book.price,
        })
    }

    /// Counts all books (ignores any filter).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bookstore_core::catalog;

    fn book(title: &str, category: &str, n: u32) -> Book {
        Book {
            book_id: 0,
            title: title.to_string(),
            author: "Some Author".to_string(),
            publisher: "Some Press".to_string(),
            isbn: format!("978{:010}", n),
            classification: "Fiction".to_string(),
            category: category.to_string(),
            page_count: 100 + i64::from(n),
            price: Money::from_cents(500 + i64::from(n)),
        }
    }

    /// Seeds a catalog with mixed-case titles, duplicate titles and three
    /// categories, inserted out of title order.
    async fn seeded() -> (Database, Vec<Book>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let titles = [
            ("Walden", "Classic"),
            ("apple Pie", "Cooking"),
            ("Dune", "SciFi"),
            ("Beloved", "Classic"),
            ("Zebra", "SciFi"),
            ("Dune", "Classic"),
            ("Apple Pie", "Cooking"),
            ("Emma", "Classic"),
            ("Hyperion", "SciFi"),
            ("Canaan", "Cooking"),
            ("Middlemarch", "Classic"),
            ("Foundation", "SciFi"),
        ];

        let mut stored = Vec::new();
        for (n, (title, category)) in titles.iter().enumerate() {
            let b = db
                .books()
                .insert(&book(title, category, n as u32))
                .await
                .unwrap();
            stored.push(b);
        }

        (db, stored)
    }

    fn ids(books: &[Book]) -> Vec<i64> {
        books.iter().map(|b| b.book_id).collect()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let stored = db.books().insert(&book("Dune", "SciFi", 1)).await.unwrap();
        assert!(stored.book_id > 0);

        let fetched = db.books().get_by_id(stored.book_id).await.unwrap();
        assert_eq!(fetched, Some(stored));

        assert_eq!(db.books().get_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_book() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut bad = book("Dune", "SciFi", 1);
        bad.isbn = "12".to_string();

        let err = db.books().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(db.books().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_duplicate_isbn() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.books().insert(&book("Dune", "SciFi", 1)).await.unwrap();
        let err = db.books().insert(&book("Emma", "Classic", 1)).await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "books.isbn");
                assert!(value.is_some());
            }
            other => panic!("expected a duplicate isbn, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_page_natural_order() {
        let (db, stored) = seeded().await;

        let page = db.books().page(&PageRequest::new(1, 5)).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(ids(&page.books), ids(&stored[..5]));
    }

    #[tokio::test]
    async fn test_page_sorted_by_title_is_ordinal() {
        let (db, _) = seeded().await;

        let request = PageRequest::new(1, 4).with_sort(Some(SortKey::Title));
        let page = db.books().page(&request).await.unwrap();

        let titles: Vec<&str> = page.books.iter().map(|b| b.title.as_str()).collect();
        // Uppercase sorts before lowercase; equal titles keep id order.
        assert_eq!(titles, vec!["Apple Pie", "Beloved", "Canaan", "Dune"]);
    }

    #[tokio::test]
    async fn test_page_beyond_end_keeps_total() {
        let (db, _) = seeded().await;

        let page = db.books().page(&PageRequest::new(99, 5)).await.unwrap();

        assert!(page.books.is_empty());
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn test_page_with_category_counts_filtered_rows() {
        let (db, _) = seeded().await;

        let request = PageRequest::new(1, 2).with_category(Some("Classic"));
        let page = db.books().page(&request).await.unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.books.len(), 2);
        assert!(page.books.iter().all(|b| b.category == "Classic"));
    }

    #[tokio::test]
    async fn test_page_matches_in_memory_query() {
        let (db, stored) = seeded().await;

        for sort in [None, Some(SortKey::Title)] {
            for category in [None, Some("Classic"), Some("Cooking"), Some("Nope")] {
                for size in [1, 5, 7] {
                    for page in 1..=4 {
                        let request = PageRequest::new(page, size)
                            .with_sort(sort)
                            .with_category(category);

                        let expected = catalog::query(&stored, &request);
                        let actual = db.books().page(&request).await.unwrap();

                        assert_eq!(actual.total, expected.total, "{:?}", request);
                        assert_eq!(ids(&actual.books), ids(&expected.books), "{:?}", request);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_categories_distinct_and_sorted() {
        let (db, _) = seeded().await;

        let categories = db.books().categories().await.unwrap();

        assert_eq!(categories, vec!["Classic", "Cooking", "SciFi"]);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let page = db.books().page(&PageRequest::default()).await.unwrap();
        assert_eq!(page, PageResult::empty());
        assert!(db.books().categories().await.unwrap().is_empty());
    }
}
