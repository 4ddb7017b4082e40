//! Catalog endpoints.
//!
//! ## Query Coercion
//! ```text
//! ?page=abc&pageSize=-1&sort=TITLE&category=
//!        │
//!        ▼  every field arrives as an optional raw string
//! PageRequest::normalize
//!        │
//!        ▼
//! PageRequest { page: 1, page_size: 5, sort: Some(Title), category: None }
//! ```
//!
//! No combination of query parameters produces a 4xx.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use bookstore_core::{Book, CoreError, PageRequest, PageResult};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Raw query string of `GET /api/books`.
///
/// Read from key/value pairs rather than a typed extractor, so a malformed
/// or repeated parameter is coerced instead of rejected. The first
/// occurrence of a key wins and unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BooksQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
    pub category: Option<String>,
}

impl BooksQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = BooksQuery::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "pageSize" => &mut query.page_size,
                "sort" => &mut query.sort,
                "category" => &mut query.category,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        query
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest::normalize(
            self.page.as_deref(),
            self.page_size.as_deref(),
            self.sort.as_deref(),
            self.category.as_deref(),
        )
    }
}

/// GET /api/books: one page of the catalog plus the filtered total.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageResult>> {
    let request = BooksQuery::from_pairs(pairs).to_request();
    let page = state.db.books().page(&request).await?;

    tracing::debug!(total = page.total, returned = page.books.len(), "Served book page");
    Ok(Json(page))
}

/// GET /api/books/{id}
///
/// A non-numeric id cannot match a book and is reported as not found.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    let book_id: i64 = match id.trim().parse() {
        Ok(book_id) => book_id,
        Err(_) => return Err(ApiError::not_found("Book", &id)),
    };

    let book = state
        .db
        .books()
        .get_by_id(book_id)
        .await?
        .ok_or(CoreError::BookNotFound(book_id))?;

    Ok(Json(book))
}

/// GET /api/categories: distinct categories for the filter list.
#[instrument(skip(state))]
pub async fn categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let categories = state.db.books().categories().await?;
    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::SortKey;

    #[test]
    fn test_empty_query_uses_defaults() {
        let request = BooksQuery::default().to_request();

        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_malformed_query_is_coerced() {
        let query = BooksQuery {
            page: Some("abc".to_string()),
            page_size: Some("-1".to_string()),
            sort: Some("price".to_string()),
            category: Some("  ".to_string()),
        };

        let request = query.to_request();

        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 5);
        assert_eq!(request.sort(), None);
        assert_eq!(request.category(), None);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let query = BooksQuery::from_pairs(pairs(&[
            ("page", "2"),
            ("page", "7"),
            ("pageSize", "10"),
            ("utm_source", "mail"),
            ("sort", "TITLE"),
        ]));

        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.category, None);

        let request = query.to_request();
        assert_eq!(request.page(), 2);
        assert_eq!(request.page_size(), 10);
        assert_eq!(request.sort(), Some(SortKey::Title));
    }

    #[test]
    fn test_valid_query_passes_through() {
        let query = BooksQuery {
            page: Some("3".to_string()),
            page_size: Some("10".to_string()),
            sort: Some("title".to_string()),
            category: Some("Classic".to_string()),
        };

        let request = query.to_request();

        assert_eq!(request.page(), 3);
        assert_eq!(request.page_size(), 10);
        assert_eq!(request.sort(), Some(SortKey::Title));
        assert_eq!(request.category(), Some("Classic"));
    }
}
