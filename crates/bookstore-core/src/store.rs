//! # Cart Persistence
//!
//! The key-value storage capability and the session that keeps a cart
//! mirrored into it.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Session                                     │
//! │                                                                         │
//! │  open(store)                                                           │
//! │  └── store.get("cart")                                                 │
//! │       ├── None          ──► empty cart                                 │
//! │       ├── valid JSON    ──► replayed as Adds (normalized)              │
//! │       └── garbage       ──► warn!, empty cart                          │
//! │                                                                         │
//! │  dispatch(op)                                                          │
//! │  ├── 1. cart::apply (in memory, always succeeds)                       │
//! │  └── 2. store.set("cart", json) ── Err ──► returned to caller          │
//! │                                        (in-memory state is kept)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate performs no I/O itself: file or browser storage lives with
//! the caller and is plugged in through [`KeyValueStore`].

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cart::{CartOp, CartState, CartTotals};
use crate::error::StoreResult;
use crate::CART_STORAGE_KEY;

// =============================================================================
// Storage Capability
// =============================================================================

/// A string-keyed store of string values.
///
/// Implement this for whatever durable medium the client has.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store. Contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// The authoritative in-memory cart, written through to a store after
/// every change.
#[derive(Debug)]
pub struct CartSession<S: KeyValueStore> {
    state: CartState,
    store: S,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Loads the cart persisted in `store`.
    ///
    /// A missing or unparseable value yields an empty cart. A failing
    /// store read is returned as an error.
    pub fn open(store: S) -> StoreResult<Self> {
        let state = match store.get(CART_STORAGE_KEY)? {
            None => CartState::new(),
            Some(raw) => match serde_json::from_str::<CartState>(&raw) {
                Ok(state) => {
                    debug!(lines = state.len(), "Loaded persisted cart");
                    state
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable persisted cart");
                    CartState::new()
                }
            },
        };

        Ok(CartSession { state, store })
    }

    /// Applies `op` and persists the result.
    ///
    /// The in-memory cart is updated before the write, so a write error
    /// leaves `state()` reflecting `op` while the store holds the
    /// previous snapshot.
    pub fn dispatch(&mut self, op: CartOp) -> StoreResult<()> {
        debug!(?op, "Applying cart operation");
        self.state.apply(op);
        self.persist()
    }

    fn persist(&mut self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.state)?;
        self.store.set(CART_STORAGE_KEY, &json).map_err(|e| {
            warn!(error = %e, "Failed to persist cart");
            e
        })
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLineItem;
    use crate::error::StoreError;
    use crate::money::Money;

    /// Store whose reads or writes can be made to fail.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            if self.fail_reads {
                return Err(StoreError::read(key, "unavailable"));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::write(key, "quota exceeded"));
            }
            self.inner.set(key, value)
        }
    }

    fn add(id: i64, qty: i64) -> CartOp {
        CartOp::Add(CartLineItem::new(id, format!("Book {}", id), Money::from_cents(500), qty))
    }

    #[test]
    fn test_open_empty_store() {
        let session = CartSession::open(MemoryStore::new()).unwrap();
        assert!(session.state().is_empty());
    }

    #[test]
    fn test_dispatch_persists_snapshot() {
        let mut session = CartSession::open(MemoryStore::new()).unwrap();
        session.dispatch(add(1, 2)).unwrap();

        let stored = session.store().get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(
            stored,
            r#"[{"bookId":1,"title":"Book 1","price":5.0,"quantity":2}]"#
        );
    }

    #[test]
    fn test_reopen_restores_cart() {
        let mut session = CartSession::open(MemoryStore::new()).unwrap();
        session.dispatch(add(1, 2)).unwrap();
        session.dispatch(add(2, 1)).unwrap();
        session.dispatch(CartOp::Remove { book_id: 1 }).unwrap();

        let reopened = CartSession::open(session.into_store()).unwrap();

        assert_eq!(reopened.state().len(), 1);
        assert_eq!(reopened.state().items()[0].book_id, 2);
    }

    #[test]
    fn test_open_normalizes_stored_cart() {
        let mut store = MemoryStore::new();
        store
            .set(
                CART_STORAGE_KEY,
                r#"[{"bookId":4,"title":"X","price":1,"quantity":1},
                    {"bookId":4,"title":"X","price":1,"quantity":1},
                    {"bookId":5,"title":"Y","price":1,"quantity":0}]"#,
            )
            .unwrap();

        let session = CartSession::open(store).unwrap();

        assert_eq!(session.state().len(), 1);
        assert_eq!(session.state().items()[0].quantity, 2);
    }

    #[test]
    fn test_open_with_garbage_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(CART_STORAGE_KEY, "{not json").unwrap();

        let session = CartSession::open(store).unwrap();
        assert!(session.state().is_empty());
    }

    #[test]
    fn test_open_propagates_read_failure() {
        let store = FlakyStore {
            fail_reads: true,
            ..Default::default()
        };

        let err = CartSession::open(store).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut session = CartSession::open(FlakyStore::default()).unwrap();
        session.dispatch(add(1, 1)).unwrap();

        session.store.fail_writes = true;
        let err = session.dispatch(add(2, 3)).unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(session.state().len(), 2);
        assert_eq!(session.totals().total_quantity, 4);

        // Store still holds the snapshot from before the failed write.
        let stored: CartState =
            serde_json::from_str(&session.store().get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_session_over_borrowed_store() {
        let mut store = MemoryStore::new();
        {
            let mut session = CartSession::open(&mut store).unwrap();
            session.dispatch(add(9, 1)).unwrap();
        }
        assert!(store.get(CART_STORAGE_KEY).unwrap().is_some());
    }
}
