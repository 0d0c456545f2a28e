//! In-process store
//!
//! A `DashMap` keyed by the full key string, hashed with FxHash.
//!
//! # Design
//!
//! - DashMap: sharded map, readers only take a shard read lock
//! - FxHash: fast non-crypto hash, keys are short strings
//! - Slot: either a scalar or a list, mirroring the two shapes the cache needs
//!
//! # Thread Safety
//!
//! `increment` and `append_to_list` run under the target shard's write lock
//! through `DashMap::entry`, so concurrent increments never lose updates and
//! concurrent appends never interleave.

use callcache_core::store::resolve_range;
use callcache_core::{Error, KeyValueStore, Result, Value};
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};

type FxBuild = BuildHasherDefault<FxHasher>;

/// What a key holds.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Scalar(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// In-process `KeyValueStore`.
///
/// Nothing survives the process; intended for tests, demos and embedding.
///
/// # Example
///
/// ```ignore
/// use callcache_storage::MemoryStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// store.set("greeting", &"hello".into())?;
/// ```
pub struct MemoryStore {
    data: DashMap<String, Slot, FxBuild>,
    /// Total writes applied, for diagnostics
    writes: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: DashMap::with_hasher(FxBuild::default()),
            writes: AtomicU64::new(0),
        }
    }

    /// Create with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity_and_hasher(capacity, FxBuild::default()),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total writes applied since creation.
    #[inline]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }

    #[inline]
    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("keys", &self.len())
            .field("writes", &self.write_count())
            .finish()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.data
            .insert(key.to_string(), Slot::Scalar(value.to_bytes()));
        self.record_write();
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.data.get(key).as_deref() {
            None => Ok(None),
            Some(Slot::Scalar(bytes)) => Ok(Some(bytes.clone())),
            Some(Slot::List(_)) => Err(Error::WrongType {
                key: key.to_string(),
                expected: "scalar",
            }),
        }
    }

    fn increment(&self, key: &str) -> Result<i64> {
        let mut slot = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Slot::Scalar(b"0".to_vec()));

        let current = match &*slot {
            Slot::Scalar(bytes) => parse_counter(bytes).ok_or_else(|| Error::WrongType {
                key: key.to_string(),
                expected: "integer",
            })?,
            Slot::List(_) => {
                return Err(Error::WrongType {
                    key: key.to_string(),
                    expected: "integer",
                })
            }
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::store(format!("increment of '{}' would overflow", key)))?;
        *slot = Slot::Scalar(next.to_string().into_bytes());
        drop(slot);

        self.record_write();
        Ok(next)
    }

    fn append_to_list(&self, key: &str, value: &str) -> Result<()> {
        let mut slot = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));

        match &mut *slot {
            Slot::List(items) => items.push(value.as_bytes().to_vec()),
            Slot::Scalar(_) => {
                return Err(Error::WrongType {
                    key: key.to_string(),
                    expected: "list",
                })
            }
        }
        drop(slot);

        self.record_write();
        Ok(())
    }

    fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        match self.data.get(key).as_deref() {
            None => Ok(Vec::new()),
            Some(Slot::List(items)) => Ok(match resolve_range(items.len(), start, end) {
                Some((from, to)) => items[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(Slot::Scalar(_)) => Err(Error::WrongType {
                key: key.to_string(),
                expected: "list",
            }),
        }
    }

    fn flush(&self) -> Result<()> {
        self.data.clear();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn parse_counter(bytes: &[u8]) -> Option<i64> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}
