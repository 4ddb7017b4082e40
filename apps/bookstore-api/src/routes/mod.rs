//! HTTP route handlers.
//!
//! ```text
//! GET /health           health::check
//! GET /api/books        books::list
//! GET /api/books/{id}   books::get
//! GET /api/categories   books::categories
//! ```

pub mod books;
pub mod health;
