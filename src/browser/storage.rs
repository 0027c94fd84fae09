//! `window.localStorage` as a [`KeyValueStorage`].

use super::js_error_text;
use crate::store::{KeyValueStorage, StoreError};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the page origin's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when there is no window or the
    /// browser has storage disabled, and [`StoreError::Read`] when accessing
    /// it throws (for example a sandboxed iframe).
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|err| StoreError::Read(js_error_text(&err)))?
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| StoreError::Read(js_error_text(&err)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write(js_error_text(&err)))
    }
}
