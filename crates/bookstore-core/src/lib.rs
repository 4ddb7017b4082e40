//! # bookstore-core: Pure Catalog & Cart Logic
//!
//! This crate is the **heart** of the bookstore. It holds the only two
//! pieces with a real contract (page arithmetic and the cart reducer) as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────────────┐    ┌──────────────────────────────┐  │
//! │  │   bookstore-api (axum)       │    │   bookstore-cli (client)     │  │
//! │  │   GET /api/books             │◄───│   book table, paging, cart   │  │
//! │  └──────────────┬───────────────┘    └──────────────┬───────────────┘  │
//! │                 │                                   │                   │
//! │  ┌──────────────▼───────────────────────────────────▼───────────────┐  │
//! │  │               ★ bookstore-core (THIS CRATE) ★                     │  │
//! │  │                                                                   │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │  │
//! │  │   │  catalog  │  │   cart    │  │   store   │  │   money   │    │  │
//! │  │   │ PageReq   │  │ CartState │  │ KV trait  │  │   Money   │    │  │
//! │  │   │ query()   │  │ apply()   │  │ Session   │  │  decimal  │    │  │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │  │
//! │  │                                                                   │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │                 │                                                       │
//! │  ┌──────────────▼───────────────────────────────────────────────────┐  │
//! │  │                bookstore-db (SQLite, same page contract)          │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Book` record
//! - [`money`] - Integer-cent money with a decimal wire form
//! - [`catalog`] - Page request normalization and the catalog query
//! - [`cart`] - Cart line items and the ledger reducer
//! - [`store`] - Key-value storage capability and the cart session
//! - [`validation`] - Book record validation
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::cart::{apply, CartLineItem, CartOp, CartState};
//! use bookstore_core::Money;
//!
//! let line = CartLineItem::new(1, "Les Miserables", Money::from_cents(999), 2);
//! let state = apply(CartState::new(), CartOp::Add(line.clone()));
//! let state = apply(state, CartOp::Add(CartLineItem { quantity: 3, ..line }));
//!
//! assert_eq!(state.len(), 1);
//! assert_eq!(state.items()[0].quantity, 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineItem, CartOp, CartState, CartTotals};
pub use catalog::{PageRequest, PageResult, SortKey};
pub use error::{CoreError, StoreError, ValidationError};
pub use money::Money;
pub use store::{CartSession, KeyValueStore, MemoryStore};
pub use types::Book;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page used when the request has none or an invalid one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the request has none or an invalid one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Page sizes the catalog browser offers.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [5, 10, 15];

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";
