//! # Repository Module
//!
//! Database repository implementations for the bookstore.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.books().page(&request)                                     │
//! │       ▼                                                                 │
//! │  BookRepository                                                        │
//! │  ├── page(&self, request)      COUNT + ORDER BY / LIMIT / OFFSET       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── categories(&self)                                                 │
//! │  ├── count(&self)                                                      │
//! │  └── insert(&self, book)       validated first                         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - Catalog paging, lookup and seeding

pub mod book;
