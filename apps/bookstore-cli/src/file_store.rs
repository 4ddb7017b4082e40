//! # File-backed Key-Value Store
//!
//! Persists string entries as one JSON object on disk, the terminal
//! counterpart of a browser's `localStorage`.
//!
//! ```text
//! ~/.local/share/bookstore/cart.json
//! {
//!   "cart": "[{\"bookId\":3,\"title\":\"Dune\",\"price\":9.99,\"quantity\":2}]"
//! }
//! ```
//!
//! Every `set` rewrites the whole file through a temporary sibling and a
//! rename, so a crash never leaves a half-written cart.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use bookstore_core::error::{StoreError, StoreResult};
use bookstore_core::KeyValueStore;
use directories::ProjectDirs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `cart.json` in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bookstore", "bookstore").map(|dirs| dirs.data_dir().join("cart.json"))
    }

    fn load(&self, key: &str) -> StoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::read(key, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::read(key, e)),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        // An unreadable file is replaced rather than blocking every write.
        let mut entries = self.load(key).unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::write(key, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::write(key, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::write(key, e))?;

        debug!(path = %self.path.display(), key, "Store entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::cart::{CartLineItem, CartOp};
    use bookstore_core::{CartSession, Money, CART_STORAGE_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("cart.json"));

        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("cart.json"));

        store.set("cart", "[]").unwrap();
        store.set("other", "x").unwrap();

        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{oops").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("cart"), Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{oops").unwrap();

        let mut store = FileStore::new(&path);
        store.set("cart", "[]").unwrap();

        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = FileStore::new(blocker.join("cart.json"));
        assert!(matches!(store.set("cart", "[]"), Err(StoreError::Write { .. })));
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cart.json");

        {
            let mut session = CartSession::open(FileStore::new(&path)).unwrap();
            session
                .dispatch(CartOp::Add(CartLineItem::new(3, "Dune", Money::from_cents(999), 2)))
                .unwrap();
        }

        let session = CartSession::open(FileStore::new(&path)).unwrap();
        assert_eq!(session.state().len(), 1);
        assert_eq!(session.totals().subtotal.cents(), 1998);

        let raw = FileStore::new(&path).get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
    }
}
