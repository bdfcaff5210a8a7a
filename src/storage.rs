/// Persistence of the saved language pair collection

use crate::error::StorageError;
use crate::language_pair::LanguagePair;
use serde_json::Value;

/// Asynchronous key-value persistence service (chrome.storage or an in-memory double).
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read `key`, yielding `default` when nothing is stored under it
    async fn get(&self, key: &str, default: Value) -> Result<Value, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Owns the collection stored under a single key. Writes always replace the
/// full collection; there is no cross-tab locking.
pub struct ItemStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ItemStore<S> {
    pub fn new(store: S, key: &str) -> Self {
        ItemStore {
            store,
            key: key.to_string(),
        }
    }

    pub async fn get_items(&self) -> Result<Vec<LanguagePair>, StorageError> {
        let value = self.store.get(&self.key, Value::Array(Vec::new())).await?;

        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn set_items(&self, items: &[LanguagePair]) -> Result<(), StorageError> {
        let value = serde_json::to_value(items)?;
        self.store.set(&self.key, value).await
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_get_items_empty_store() {
        let items = ItemStore::new(MemoryStore::new(), "items");

        let result = block_on(items.get_items());

        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let items = ItemStore::new(MemoryStore::new(), "items");
        let saved = vec![
            LanguagePair::new("en", "fr"),
            LanguagePair::new("de", "it"),
            LanguagePair::new("ja", "en"),
        ];

        block_on(items.set_items(&saved)).unwrap();
        let loaded = block_on(items.get_items()).unwrap();

        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_set_items_overwrites() {
        let store = MemoryStore::new();
        let items = ItemStore::new(store.clone(), "items");

        block_on(items.set_items(&[LanguagePair::new("en", "fr")])).unwrap();
        block_on(items.set_items(&[LanguagePair::new("de", "it")])).unwrap();

        assert_eq!(
            store.raw("items"),
            Some(serde_json::json!([{"sl": "de", "tl": "it"}]))
        );
    }

    #[test]
    fn test_reads_legacy_null_codes() {
        let store = MemoryStore::new();
        block_on(store.set("items", serde_json::json!([{"sl": null, "tl": "fr"}]))).unwrap();
        let items = ItemStore::new(store, "items");

        let loaded = block_on(items.get_items()).unwrap();

        assert_eq!(loaded[0].sl, None);
        assert_eq!(loaded[0].label(), ":fr");
    }

    #[test]
    fn test_backend_error_propagates() {
        let store = MemoryStore::new();
        store.fail_with_last_error(true);
        let items = ItemStore::new(store, "items");

        assert!(matches!(block_on(items.get_items()), Err(StorageError::Backend(_))));
        assert!(matches!(block_on(items.set_items(&[])), Err(StorageError::Backend(_))));
    }

    #[test]
    fn test_malformed_value_is_serialization_error() {
        let store = MemoryStore::new();
        block_on(store.set("items", serde_json::json!("not a list"))).unwrap();
        let items = ItemStore::new(store, "items");

        assert!(matches!(block_on(items.get_items()), Err(StorageError::Serialization(_))));
    }
}
