//! Cart persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The cart lives under a single key in the page origin's key-value storage.
//! [`KeyValueStorage`] abstracts that storage (browser `localStorage` under the
//! `csr` feature, [`MemoryStorage`] on the host), and [`JsonCartStore`] layers
//! the JSON array encoding on top of it as a [`CartStore`].
//!
//! TRADE-OFFS
//! ==========
//! A missing key, invalid JSON, and any non-array value all load as an empty
//! cart; the next successful add overwrites them. Any JSON array loads, even
//! with entries this crate does not recognize, so one odd entry written by
//! another script never costs the shopper the rest of their cart. There is no format version and
//! no cross-tab coordination: saves are full overwrites, last writer wins.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::cart::Cart;

/// Error raised by storage backends and the cart store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No storage is reachable (no window, or storage disabled by the browser).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused a read.
    #[error("storage read failed: {0}")]
    Read(String),
    /// The backend refused a write (quota exceeded, private mode).
    #[error("storage write failed: {0}")]
    Write(String),
    /// The cart could not be encoded as JSON.
    #[error("cart encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage with `localStorage` semantics.
pub trait KeyValueStorage {
    /// Read the raw value for `key`, `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load/save seam injected into [`crate::controller::CartController`].
pub trait CartStore {
    /// Load the current cart. Absent or unreadable state loads as empty.
    fn load(&self) -> Cart;

    /// Persist `cart`, fully replacing the stored value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when encoding or the backend write fails.
    fn save(&mut self, cart: &Cart) -> Result<(), StoreError>;
}

/// [`CartStore`] that keeps the cart as a JSON array under one storage key.
#[derive(Debug)]
pub struct JsonCartStore<K> {
    backend: K,
    key: String,
}

impl<K: KeyValueStorage> JsonCartStore<K> {
    pub fn new(backend: K, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<K: KeyValueStorage> CartStore for JsonCartStore<K> {
    fn load(&self) -> Cart {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(err) => {
                log::warn!("cart load failed for key {}: {err}", self.key);
                return Cart::new();
            }
        };
        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(err) => {
                log::warn!("discarding non-array cart under key {}: {err}", self.key);
                Cart::new()
            }
        }
    }

    fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.backend.set_item(&self.key, &raw)?;
        log::debug!("saved cart under key {} ({} entries)", self.key, cart.len());
        Ok(())
    }
}

/// In-memory [`KeyValueStorage`].
///
/// Clones share the same map, so a test can keep a handle while the
/// controller owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with a raw value, bypassing the cart encoding.
    #[must_use]
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }

    /// Raw value currently stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Make subsequent writes fail, as a full quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write("quota exceeded".to_owned()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
