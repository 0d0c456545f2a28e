//! Store adapters for callcache
//!
//! This crate provides the concrete `KeyValueStore` implementations:
//! - `MemoryStore`: in-process sharded map, always available
//! - `RedisStore`: synchronous Redis connection (`redis-backend` feature)
//!
//! and the configuration used to pick one at runtime.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis_store;

pub use config::{Backend, StoreConfig, DEFAULT_REDIS_URL};
pub use memory::MemoryStore;
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;

use callcache_core::{KeyValueStore, Result};
use std::sync::Arc;
use tracing::info;

/// Open the store described by `config`.
///
/// Only acquires the handle; flushing on open is the cache's decision.
///
/// # Errors
///
/// - `Error::Connection` if a remote store is unreachable
/// - `Error::Config` if the backend was compiled out
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match &config.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        #[cfg(feature = "redis-backend")]
        Backend::Redis { url } => Arc::new(RedisStore::connect(url)?),
        #[cfg(not(feature = "redis-backend"))]
        Backend::Redis { .. } => {
            return Err(callcache_core::Error::Config {
                reason: "redis backend requested but the 'redis-backend' feature is disabled"
                    .to_string(),
            })
        }
    };
    info!(target: "callcache::storage", backend = store.backend_name(), "store opened");
    Ok(store)
}
