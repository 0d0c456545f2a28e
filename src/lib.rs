//! callcache: an instrumented scalar cache over a key-value store.
//!
//! Values are stored under random UUID keys and read back raw or converted.
//! Every `Cache::store` call is counted and its arguments and result are
//! appended to history lists, which `ReplayReporter` renders as a call log.
//!
//! ```ignore
//! use callcache::{Cache, StoreConfig, STORE_OPERATION};
//!
//! let cache = Cache::open(&StoreConfig::new())?;
//! let key = cache.store("42")?;
//! assert_eq!(cache.retrieve_integer(&key)?, Some(42));
//!
//! cache
//!     .replay_reporter()
//!     .replay(&STORE_OPERATION, &mut std::io::stdout())?;
//! ```

#![warn(missing_docs)]

mod types;

pub use types::*;

/// Open the store described by a `StoreConfig`.
pub use callcache_storage::open_store;

/// Converters usable with `Cache::retrieve_with`.
pub use callcache_engine::convert;
