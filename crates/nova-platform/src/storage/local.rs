//! `localStorage` backend.
//! Persistent across page reloads. Values are stored as UTF-8 strings.

use async_trait::async_trait;
use wasm_bindgen::JsValue;

use nova_core::ports::StoragePort;
use nova_types::{NovaError, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

fn storage_error(e: JsValue) -> NovaError {
    NovaError::Storage(format!("{:?}", e))
}

impl LocalStorage {
    /// Open the window's `localStorage`.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| NovaError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| NovaError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }

    /// Write and remove a scratch key; private browsing modes can expose
    /// a `localStorage` object that rejects writes.
    pub fn probe(&self) -> Result<()> {
        const PROBE_KEY: &str = "nova:probe";
        self.storage.set_item(PROBE_KEY, "1").map_err(storage_error)?;
        self.storage.remove_item(PROBE_KEY).map_err(storage_error)
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.storage.get_item(key).map_err(storage_error)?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| NovaError::Storage(format!("{}: {}", key, e)))?;
        self.storage.set_item(key, text).map_err(storage_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}
