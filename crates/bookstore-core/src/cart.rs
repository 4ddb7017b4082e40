//! # Cart Ledger
//!
//! Cart line items and the reducer that is the only way to change them.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Transitions                              │
//! │                                                                         │
//! │  CartOp                      Effect on CartState                        │
//! │  ──────                      ───────────────────                        │
//! │                                                                         │
//! │  Add(item) ─── id present ─► quantity += item.quantity                 │
//! │            │                 (title/price of first add kept)            │
//! │            └── id absent ──► push(item)                                 │
//! │                                                                         │
//! │  UpdateQuantity(id, q) ───── q >= 1 ─► items[i].quantity = q            │
//! │                          └── q <= 0 ─► same as Remove(id)               │
//! │                                                                         │
//! │  Remove(id) ──────────────► drop line (no-op when absent)               │
//! │                                                                         │
//! │  Clear ───────────────────► []                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Line items are unique by `book_id`
//! - Every line has `quantity >= 1`
//! - Insertion order is preserved; updates never move a line
//!
//! No operation fails. Unknown ids are silent no-ops.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Book;

// =============================================================================
// Line Item
// =============================================================================

/// One distinct book in the cart.
///
/// ## Design Notes
/// `title` and `price` are snapshots taken when the book is first added.
/// Later catalog changes do not touch a line already in the cart.
///
/// ## Wire Format
/// ```json
/// { "bookId": 3, "title": "The Great Gatsby", "price": 9.99, "quantity": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub book_id: i64,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Price at time of adding (frozen).
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a line item.
    pub fn new(book_id: i64, title: impl Into<String>, price: Money, quantity: i64) -> Self {
        CartLineItem {
            book_id,
            title: title.into(),
            price,
            quantity,
        }
    }

    /// Creates a line item from a catalog record, freezing title and price.
    pub fn from_book(book: &Book, quantity: i64) -> Self {
        CartLineItem::new(book.book_id, book.title.clone(), book.price, quantity)
    }

    /// Calculates the line total (price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Operations
// =============================================================================

/// A cart mutation. Apply these in the order they occurred: the ledger is
/// not commutative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    /// Add a line, or merge its quantity into the existing line.
    ///
    /// A non-positive quantity is ignored.
    Add(CartLineItem),

    /// Replace a line's quantity in place. `quantity <= 0` removes the line.
    UpdateQuantity { book_id: i64, quantity: i64 },

    /// Drop a line.
    Remove { book_id: i64 },

    /// Empty the cart.
    Clear,
}

// =============================================================================
// Cart State
// =============================================================================

/// The ordered set of cart lines.
///
/// ## Persistence
/// Serializes as a bare JSON array of line items. Deserializing replays
/// the array through [`CartOp::Add`], so duplicate ids merge and
/// non-positive quantities drop instead of breaking the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Applies one operation in place.
    pub fn apply(&mut self, op: CartOp) {
        match op {
            CartOp::Add(item) => self.add(item),
            CartOp::UpdateQuantity { book_id, quantity } => {
                if quantity <= 0 {
                    self.remove(book_id);
                } else if let Some(line) = self.find_mut(book_id) {
                    line.quantity = quantity;
                }
            }
            CartOp::Remove { book_id } => self.remove(book_id),
            CartOp::Clear => self.items.clear(),
        }
    }

    fn add(&mut self, item: CartLineItem) {
        if item.quantity <= 0 {
            return;
        }

        match self.find_mut(item.book_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    fn remove(&mut self, book_id: i64) {
        self.items.retain(|i| i.book_id != book_id);
    }

    fn find_mut(&mut self, book_id: i64) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.book_id == book_id)
    }

    /// The lines, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line by book id.
    pub fn get(&self, book_id: i64) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.book_id == book_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across lines, pinned at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Sum of line totals. Saturates like [`Money`].
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

impl From<Vec<CartLineItem>> for CartState {
    fn from(items: Vec<CartLineItem>) -> Self {
        items
            .into_iter()
            .fold(CartState::new(), |state, item| apply(state, CartOp::Add(item)))
    }
}

impl From<CartState> for Vec<CartLineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

/// The reducer: returns the state after `op`.
///
/// ```rust
/// use bookstore_core::cart::{apply, CartLineItem, CartOp, CartState};
/// use bookstore_core::Money;
///
/// let state = apply(CartState::new(), CartOp::Add(CartLineItem::new(1, "Dune", Money::from_cents(999), 2)));
/// let state = apply(state, CartOp::UpdateQuantity { book_id: 1, quantity: 0 });
/// assert!(state.is_empty());
/// ```
pub fn apply(mut state: CartState, op: CartOp) -> CartState {
    state.apply(op);
    state
}

// =============================================================================
// Totals
// =============================================================================

/// Cart summary for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    #[ts(type = "number")]
    pub item_count: usize,
    pub total_quantity: i64,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
