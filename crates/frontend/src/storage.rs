//! `window.localStorage` backend for the token store

use dashboard_http::storage::{StorageError, TokenStorage};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Token storage in the browser's `localStorage`
///
/// The storage handle is looked up on every call so the type stays
/// `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{value:?}"))
}

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let storage = BrowserStorage;
        storage.set("dashboard-test", "value").unwrap();
        assert_eq!(storage.get("dashboard-test").unwrap().as_deref(), Some("value"));

        storage.remove("dashboard-test").unwrap();
        assert_eq!(storage.get("dashboard-test").unwrap(), None);
    }
}
