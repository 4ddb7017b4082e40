//! # Catalog Query
//!
//! Page request normalization and the in-memory catalog query.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/books?page=2&pageSize=5&sort=title                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PageRequest::normalize() ← never rejects, only corrects               │
//! │       │   page     <1 | absent | garbage  → 1                           │
//! │       │   pageSize <1 | absent | garbage  → 5                           │
//! │       │   sort     "title" (any case)     → Title, else none            │
//! │       │   category blank                  → none                        │
//! │       ▼                                                                 │
//! │  filter by category ──► sort FULL collection ──► count ──► skip/take   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PageResult { total: 12, books: [F, G, H, I, J] }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sorting happens before slicing so page boundaries stay consistent
//! across pages. The SQL repository in `bookstore-db` implements the same
//! contract against SQLite.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Book;
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

// =============================================================================
// Sort Key
// =============================================================================

/// Column the catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    /// Ordinal, case-sensitive comparison of titles (no locale rules).
    Title,
}

impl SortKey {
    /// Parses a raw `sort` parameter. Unrecognized values mean "no sort".
    ///
    /// ```rust
    /// use bookstore_core::SortKey;
    ///
    /// assert_eq!(SortKey::parse("TITLE"), Some(SortKey::Title));
    /// assert_eq!(SortKey::parse("price"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("title") {
            Some(SortKey::Title)
        } else {
            None
        }
    }

    /// The query-string spelling of this key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
        }
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A normalized page request. Every constructor upholds `page >= 1` and
/// `page_size >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageRequest {
    /// 1-indexed page number.
    page: u32,

    page_size: u32,

    sort: Option<SortKey>,

    /// Exact-match category filter.
    category: Option<String>,
}

impl PageRequest {
    /// Creates a request, replacing zero page or page size with defaults.
    pub fn new(page: u32, page_size: u32) -> Self {
        PageRequest {
            page: if page < 1 { DEFAULT_PAGE } else { page },
            page_size: if page_size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            sort: None,
            category: None,
        }
    }

    /// Builds a request from raw query parameters.
    ///
    /// ## Default Table
    /// | Parameter  | Corrected when                    | To     |
    /// |------------|-----------------------------------|--------|
    /// | `page`     | absent, unparseable, `< 1`        | `1`    |
    /// | `pageSize` | absent, unparseable, `< 1`        | `5`    |
    /// | `sort`     | anything but `title` (any case)   | none   |
    /// | `category` | absent or blank                   | none   |
    ///
    /// ```rust
    /// use bookstore_core::{PageRequest, SortKey};
    ///
    /// let req = PageRequest::normalize(Some("abc"), Some("-3"), Some("Title"), None);
    /// assert_eq!(req.page(), 1);
    /// assert_eq!(req.page_size(), 5);
    /// assert_eq!(req.sort(), Some(SortKey::Title));
    /// ```
    pub fn normalize(
        page: Option<&str>,
        page_size: Option<&str>,
        sort: Option<&str>,
        category: Option<&str>,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let page_size = parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE);

        PageRequest::new(page, page_size)
            .with_sort(sort.and_then(SortKey::parse))
            .with_category(category)
    }

    /// Sets the sort key.
    pub fn with_sort(mut self, sort: Option<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the category filter; blank values clear it.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Number of records to skip: `(page - 1) * page_size`.
    ///
    /// Computed in u64, so it cannot overflow for any u32 inputs.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Whether a book passes the category filter.
    pub fn matches(&self, book: &Book) -> bool {
        match &self.category {
            Some(category) => book.category == *category,
            None => true,
        }
    }

    /// Number of pages needed for `total` records (0 when empty).
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists (`page * page_size < total`).
    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < total
    }

    /// The same request moved to another page.
    pub fn at_page(&self, page: u32) -> Self {
        PageRequest {
            page: page.max(DEFAULT_PAGE),
            ..self.clone()
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Parses a positive integer, saturating values above `u32::MAX`.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value: i64 = raw?.trim().parse().ok()?;
    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

// =============================================================================
// Page Result
// =============================================================================

/// One page of the catalog.
///
/// ## Invariant
/// `books.len() == min(page_size, max(0, total - (page - 1) * page_size))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageResult {
    /// Count of the full (filtered, unpaginated) collection.
    #[ts(type = "number")]
    pub total: u64,

    /// The requested slice.
    pub books: Vec<Book>,
}

impl PageResult {
    /// An empty page with no matching records.
    pub fn empty() -> Self {
        PageResult {
            total: 0,
            books: Vec::new(),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// Returns the requested page of `all_books`.
///
/// Filters by category, sorts the full filtered collection when asked
/// (stable sort, so equal titles keep their natural order), counts, then
/// skips and takes. A page past the end is an empty slice with the correct
/// total. The input is never mutated.
pub fn query(all_books: &[Book], request: &PageRequest) -> PageResult {
    let mut matching: Vec<&Book> = all_books.iter().filter(|b| request.matches(b)).collect();

    if request.sort == Some(SortKey::Title) {
        matching.sort_by(|a, b| a.title.cmp(&b.title));
    }

    let total = matching.len() as u64;
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);

    let books = matching
        .into_iter()
        .skip(skip)
        .take(request.page_size as usize)
        .cloned()
        .collect();

    PageResult { total, books }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    fn book(id: i64, title: &str, category: &str) -> Book {
        Book {
            book_id: id,
            title: title.to_string(),
            author: format!("Author {}", id),
            publisher: "Penguin".to_string(),
            isbn: format!("978-{:010}", id),
            classification: "Fiction".to_string(),
            category: category.to_string(),
            page_count: 100 + id,
            price: Money::from_cents(999),
        }
    }

    /// Twelve books titled "A".."L", stored out of alphabetical order.
    fn alphabet_books() -> Vec<Book> {
        let titles = ["K", "C", "A", "L", "F", "B", "J", "E", "H", "D", "G", "I"];
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| book(i as i64 + 1, t, "Classic"))
            .collect()
    }

    fn titles(result: &PageResult) -> Vec<&str> {
        result.books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_normalize_defaults() {
        let req = PageRequest::normalize(None, None, None, None);
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), 5);
        assert_eq!(req.sort(), None);
        assert_eq!(req.category(), None);
    }

    #[test]
    fn test_normalize_corrects_invalid_values() {
        let req = PageRequest::normalize(Some("0"), Some("-1"), Some("price"), Some("  "));
        assert_eq!((req.page(), req.page_size()), (1, 5));
        assert_eq!(req.sort(), None);
        assert_eq!(req.category(), None);

        let req = PageRequest::normalize(Some("2.5"), Some("ten"), Some(""), None);
        assert_eq!((req.page(), req.page_size()), (1, 5));

        let req = PageRequest::normalize(Some("99999999999"), Some("3"), Some("tItLe"), Some("Classic"));
        assert_eq!(req.page(), u32::MAX);
        assert_eq!(req.page_size(), 3);
        assert_eq!(req.sort(), Some(SortKey::Title));
        assert_eq!(req.category(), Some("Classic"));
    }

    #[test]
    fn test_new_replaces_zero() {
        let req = PageRequest::new(0, 0);
        assert_eq!((req.page(), req.page_size()), (1, 5));
    }

    #[test]
    fn test_page_two_sorted_by_title() {
        let books = alphabet_books();
        let req = PageRequest::new(2, 5).with_sort(Some(SortKey::Title));

        let result = query(&books, &req);

        assert_eq!(result.total, 12);
        assert_eq!(titles(&result), vec!["F", "G", "H", "I", "J"]);
    }

    #[test]
    fn test_unsorted_preserves_natural_order() {
        let books = alphabet_books();
        let result = query(&books, &PageRequest::new(1, 3));
        assert_eq!(titles(&result), vec!["K", "C", "A"]);
    }

    #[test]
    fn test_page_beyond_end_is_empty_with_total() {
        let books = alphabet_books();
        let result = query(&books, &PageRequest::new(4, 5));
        assert_eq!(result.total, 12);
        assert!(result.books.is_empty());

        let result = query(&books, &PageRequest::new(u32::MAX, u32::MAX));
        assert_eq!(result.total, 12);
        assert!(result.books.is_empty());
    }

    #[test]
    fn test_last_partial_page() {
        let books = alphabet_books();
        let req = PageRequest::new(3, 5).with_sort(Some(SortKey::Title));
        let result = query(&books, &req);
        assert_eq!(titles(&result), vec!["K", "L"]);
    }

    #[test]
    fn test_title_sort_is_case_sensitive_ordinal() {
        let books = vec![book(1, "apple", "X"), book(2, "Banana", "X"), book(3, "Zebra", "X")];
        let req = PageRequest::new(1, 10).with_sort(Some(SortKey::Title));
        let result = query(&books, &req);
        assert_eq!(titles(&result), vec!["Banana", "Zebra", "apple"]);
    }

    #[test]
    fn test_title_sort_is_stable_for_equal_titles() {
        let books = vec![book(3, "Same", "X"), book(1, "Same", "X"), book(2, "Alpha", "X")];
        let req = PageRequest::new(1, 10).with_sort(Some(SortKey::Title));
        let ids: Vec<i64> = query(&books, &req).books.iter().map(|b| b.book_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_category_filter_counts_filtered_collection() {
        let books = vec![
            book(1, "A", "Biography"),
            book(2, "B", "Classic"),
            book(3, "C", "Biography"),
            book(4, "D", "Self-Help"),
        ];
        let req = PageRequest::new(1, 1).with_category(Some("Biography"));

        let result = query(&books, &req);

        assert_eq!(result.total, 2);
        assert_eq!(titles(&result), vec!["A"]);
        assert!(req.has_next(result.total));
    }

    #[test]
    fn test_query_does_not_mutate_input() {
        let books = alphabet_books();
        let before = books.clone();
        let _ = query(&books, &PageRequest::new(1, 5).with_sort(Some(SortKey::Title)));
        assert_eq!(books, before);
    }

    #[test]
    fn test_navigation_helpers() {
        let req = PageRequest::new(1, 5);
        assert!(!req.has_previous());
        assert!(req.has_next(12));
        assert_eq!(req.total_pages(12), 3);
        assert_eq!(req.total_pages(0), 0);

        let last = req.at_page(3);
        assert!(last.has_previous());
        assert!(!last.has_next(12));
        assert_eq!(req.at_page(0).page(), 1);
    }

    #[test]
    fn test_page_result_wire_format() {
        let json = serde_json::to_value(PageResult::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "total": 0, "books": [] }));
    }

    fn arb_books() -> impl Strategy<Value = Vec<Book>> {
        prop::collection::vec("[A-Za-z]{0,4}", 0..40).prop_map(|titles| {
            titles
                .iter()
                .enumerate()
                .map(|(i, t)| book(i as i64, t, if i % 3 == 0 { "Biography" } else { "Classic" }))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_slice_length_matches_invariant(
            books in arb_books(),
            page in 1u32..12,
            page_size in 1u32..12,
            sorted in any::<bool>(),
        ) {
            let req = PageRequest::new(page, page_size)
                .with_sort(sorted.then_some(SortKey::Title));
            let result = query(&books, &req);

            let remaining = result.total.saturating_sub(req.offset());
            let expected = remaining.min(u64::from(page_size));
            prop_assert!(result.books.len() <= page_size as usize);
            prop_assert_eq!(result.books.len() as u64, expected);
            prop_assert_eq!(result.total, books.len() as u64);
        }

        #[test]
        fn prop_pages_partition_the_collection(
            books in arb_books(),
            page_size in 1u32..8,
            sorted in any::<bool>(),
            filtered in any::<bool>(),
        ) {
            let base = PageRequest::new(1, page_size)
                .with_sort(sorted.then_some(SortKey::Title))
                .with_category(filtered.then_some("Biography"));
            let total = query(&books, &base).total;

            let mut seen: Vec<i64> = Vec::new();
            for page in 1..=base.total_pages(total) {
                let result = query(&books, &base.at_page(page as u32));
                seen.extend(result.books.iter().map(|b| b.book_id));
            }

            prop_assert_eq!(seen.len() as u64, total);
            let mut unique = seen.clone();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), seen.len());
        }

        #[test]
        fn prop_title_sort_is_repeatable(books in arb_books(), page_size in 1u32..8) {
            let req = PageRequest::new(1, page_size).with_sort(Some(SortKey::Title));
            prop_assert_eq!(query(&books, &req), query(&books, &req));
        }
    }
}
