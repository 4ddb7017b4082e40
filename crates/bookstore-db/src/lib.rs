//! # bookstore-db: Database Layer for the Bookstore
//!
//! SQLite storage for the book catalog, queried with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Data Flow                              │
//! │                                                                         │
//! │  GET /api/books?page=2&pageSize=5&sort=title                           │
//! │       │                                                                 │
//! │       ▼  PageRequest::normalize (bookstore-core)                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookstore-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │   (book.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ BookRepo      │    │ 001_init.sql │  │   │
//! │  │   │ WAL, FKs      │    │ COUNT + page  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./bookstore.db (BOOKSTORE_DATABASE)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The book repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_core::PageRequest;
//! use bookstore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./bookstore.db")).await?;
//!
//! let request = PageRequest::normalize(Some("2"), Some("5"), Some("title"), None);
//! let page = db.books().page(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};

pub use repository::book::BookRepository;
