//! Shared helpers for the comprehensive suite.

use callcache::{Cache, KeyValueStore, MemoryStore};
use std::sync::Arc;

/// Fresh cache over its own in-memory store.
pub fn memory_cache() -> Cache {
    Cache::new(Arc::new(MemoryStore::new()))
}

/// Fresh cache plus a second handle to the same store.
pub fn memory_cache_with_store() -> (Cache, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    (Cache::new(store.clone()), store)
}

/// Full list under `key`, decoded.
pub fn read_list(store: &Arc<dyn KeyValueStore>, key: &str) -> Vec<String> {
    store
        .list_range(key, 0, -1)
        .unwrap()
        .into_iter()
        .map(|entry| String::from_utf8(entry).unwrap())
        .collect()
}
