/// Bindings to the extension APIs through the JS bridge module

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/chrome_bridge.js")]
extern "C" {
    fn hasStorageArea(area: &str) -> bool;

    #[wasm_bindgen(catch)]
    async fn storageGet(area: &str, key: &str, fallback: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(area: &str, key: &str, value: JsValue) -> Result<(), JsValue>;

    fn sendRuntimeMessage(message: JsValue);

    fn watchNavigation(callback: &js_sys::Function);
}

/// Which `chrome.storage` area a store reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Synchronized across the profile's browsers
    Sync,
    /// Persistent, this browser only
    Local,
    /// Cleared when the browser session ends
    Session,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Sync => "sync",
            StorageArea::Local => "local",
            StorageArea::Session => "session",
        }
    }
}

/// `KeyValueStore` backed by one `chrome.storage` area
#[derive(Debug, Clone, Copy)]
pub struct ChromeStorage {
    area: StorageArea,
}

impl ChromeStorage {
    pub fn new(area: StorageArea) -> Self {
        ChromeStorage { area }
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if hasStorageArea(self.area.as_str()) {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str, default: Value) -> Result<Value, StorageError> {
        self.ensure_available()?;

        let value_js = storageGet(self.area.as_str(), key, to_js(&default)?).await?;
        if value_js.is_undefined() {
            return Ok(default);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map_err(|e| StorageError::Serialization(format!("Failed to parse storage: {:?}", e)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.ensure_available()?;

        storageSet(self.area.as_str(), key, to_js(&value)?).await?;
        Ok(())
    }
}

/// Plain JS objects, not `Map`s, so chrome.storage can persist them
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, StorageError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize storage: {:?}", e)))
}

/// Fire-and-forget message to the background service worker
pub fn send_message<T: Serialize>(message: &T) {
    match to_js(message) {
        Ok(message_js) => sendRuntimeMessage(message_js),
        Err(e) => log::warn!("Dropping runtime message: {}", e),
    }
}

/// Call `callback` after every same-document navigation of the host page
pub fn watch_navigation(callback: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    watchNavigation(closure.as_ref().unchecked_ref());
    closure.forget();
}
