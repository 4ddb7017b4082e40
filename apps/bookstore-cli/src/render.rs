//! Plain-text rendering of catalog pages and the cart.

use std::fmt::Write;

use bookstore_core::{Book, CartState, CartTotals, PageRequest, PageResult};

/// Truncates to `width` characters, marking the cut with `~`.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

fn book_row(out: &mut String, book: &Book) {
    let _ = writeln!(
        out,
        "{:>4}  {:<32}  {:<22}  {:<18}  {:>5}  {:>8}",
        book.book_id,
        fit(&book.title, 32),
        fit(&book.author, 22),
        fit(&book.category, 18),
        book.page_count,
        book.price.to_string(),
    );
}

/// Book table followed by a `Page X of Y` footer.
pub fn book_page(request: &PageRequest, page: &PageResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>4}  {:<32}  {:<22}  {:<18}  {:>5}  {:>8}",
        "ID", "Title", "Author", "Category", "Pages", "Price"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    if page.books.is_empty() {
        let _ = writeln!(out, "  (no books on this page)");
    }
    for book in &page.books {
        book_row(&mut out, book);
    }

    let _ = writeln!(out, "{}", "-".repeat(100));
    let _ = write!(
        out,
        "Page {} of {}  ({} books)",
        request.page(),
        request.total_pages(page.total).max(1),
        page.total
    );
    if request.has_previous() {
        let _ = write!(out, "  --page {} for previous", request.page() - 1);
    }
    if request.has_next(page.total) {
        let _ = write!(out, "  --page {} for next", request.page() + 1);
    }
    out.push('\n');

    out
}

/// Cart lines with line totals, then the cart summary.
pub fn cart(state: &CartState) -> String {
    let mut out = String::new();

    if state.is_empty() {
        out.push_str("Your cart is empty.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>4}  {:<32}  {:>8}  {:>4}  {:>9}",
        "ID", "Title", "Price", "Qty", "Total"
    );
    let _ = writeln!(out, "{}", "-".repeat(65));

    for line in state.items() {
        let _ = writeln!(
            out,
            "{:>4}  {:<32}  {:>8}  {:>4}  {:>9}",
            line.book_id,
            fit(&line.title, 32),
            line.price.to_string(),
            line.quantity,
            line.line_total().to_string(),
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(65));
    out.push_str(&totals(&CartTotals::from(state)));
    out
}

pub fn totals(totals: &CartTotals) -> String {
    format!(
        "{} title(s), {} item(s), subtotal {}\n",
        totals.item_count, totals.total_quantity, totals.subtotal
    )
}
