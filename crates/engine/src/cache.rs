//! Cache: store scalars under generated keys, read them back typed.
//!
//! # Design
//!
//! `Cache` holds an `Arc<dyn KeyValueStore>` and nothing else of note.
//! `store` is instrumented under [`STORE_OPERATION`] with call counting
//! followed by call history, so every write leaves a trace that
//! [`ReplayReporter`] can render.
//!
//! Opening a cache never wipes the store unless the configuration asks for
//! it (`reset_on_open`); `reset_all` is the explicit way to start clean.
//!
//! # Example
//!
//! ```ignore
//! let cache = Cache::open(&StoreConfig::from_env()?)?;
//!
//! let key = cache.store(b"hello")?;
//! assert_eq!(cache.retrieve(&key)?, Some(b"hello".to_vec()));
//!
//! let key = cache.store("42")?;
//! assert_eq!(cache.retrieve_integer(&key)?, Some(42));
//! ```

use crate::convert;
use crate::recorder::Instrumented;
use crate::replay::ReplayReporter;
use callcache_core::{CallArgs, KeyValueStore, OperationName, Result, Value};
use callcache_storage::{open_store, StoreConfig};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Name `Cache::store` is recorded under.
pub const STORE_OPERATION: OperationName = OperationName::from_static("Cache.store");

/// Scalar cache over a key-value store.
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
    store_op: Instrumented,
}

impl Cache {
    /// Wrap an existing store handle. No side effects.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let store_op = Instrumented::new(STORE_OPERATION)
            .count_calls(store.clone())
            .call_history(store.clone());
        Self { store, store_op }
    }

    /// Open the store described by `config`.
    ///
    /// # Errors
    ///
    /// `Error::Connection` if the store is unreachable.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let cache = Self::new(open_store(config)?);
        if config.reset_on_open {
            cache.reset_all()?;
        }
        Ok(cache)
    }

    /// Remove every entry, counter and history list in the store.
    pub fn reset_all(&self) -> Result<()> {
        self.store.flush()?;
        info!(target: "callcache::cache", backend = self.store.backend_name(), "store reset");
        Ok(())
    }

    /// Store `data` under a fresh random key and return the key.
    pub fn store(&self, data: impl Into<Value>) -> Result<String> {
        let value = data.into();
        let args = CallArgs::single(value.clone());
        self.store_op.invoke(&args, || self.write_entry(&value))
    }

    fn write_entry(&self, value: &Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, value)?;
        debug!(target: "callcache::cache", %key, kind = value.kind(), "entry stored");
        Ok(key)
    }

    /// Raw bytes under `key`, or `None` if the key was never stored.
    pub fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let raw = self.store.get(key)?;
        debug!(target: "callcache::cache", key, found = raw.is_some(), "entry read");
        Ok(raw)
    }

    /// Value under `key` passed through `converter`.
    ///
    /// The converter only runs when the key exists; its error is returned
    /// unchanged.
    pub fn retrieve_with<T, F>(&self, key: &str, converter: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.retrieve(key)?.map(converter).transpose()
    }

    /// Value under `key` decoded as UTF-8.
    pub fn retrieve_text(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, convert::to_text)
    }

    /// Value under `key` parsed as a base-10 integer.
    pub fn retrieve_integer(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, convert::to_integer)
    }

    /// Value under `key` parsed as a float.
    pub fn retrieve_float(&self, key: &str) -> Result<Option<f64>> {
        self.retrieve_with(key, convert::to_float)
    }

    /// How many times `operation` has been invoked; 0 if never.
    pub fn call_count(&self, operation: &OperationName) -> Result<i64> {
        Ok(self
            .retrieve_integer(operation.counter_key())?
            .unwrap_or(0))
    }

    /// Name the `store` operation is recorded under.
    pub fn store_operation(&self) -> &OperationName {
        self.store_op.operation()
    }

    /// Shared handle to the underlying store.
    pub fn store_handle(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    /// Reporter over this cache's store.
    pub fn replay_reporter(&self) -> ReplayReporter {
        ReplayReporter::new(self.store.clone())
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.store.backend_name())
            .field("store_op", &self.store_op)
            .finish()
    }
}
