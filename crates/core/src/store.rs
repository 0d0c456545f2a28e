//! The key-value store capability
//!
//! The cache, the recorder and the replay reporter only ever talk to the
//! backing store through this trait. Implementations live in
//! `callcache-storage` (in-process map, Redis).
//!
//! # Atomicity
//!
//! `increment` and `append_to_list` must each be atomic on their own:
//! concurrent increments never lose updates and concurrent appends never
//! interleave partial entries. Nothing stronger is required.

use crate::{Result, Value};

/// Synchronous key-value store.
///
/// Object safe; shared as `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    /// Write `value` under `key` in its native byte form, replacing any scalar.
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// Raw bytes under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Add one to the integer under `key` (absent counts as 0) and return
    /// the new value.
    fn increment(&self, key: &str) -> Result<i64>;

    /// Append `value` to the tail of the list under `key`, creating it if absent.
    fn append_to_list(&self, key: &str, value: &str) -> Result<()>;

    /// Elements `start..=end` of the list under `key`.
    ///
    /// Negative indices count from the tail (`-1` is the last element),
    /// out-of-range bounds are clamped and a missing key yields an empty list.
    fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>>;

    /// Remove every key in the store's namespace.
    fn flush(&self) -> Result<()>;

    /// Short backend name, for logs.
    fn backend_name(&self) -> &'static str {
        "unknown"
    }
}

/// Resolve `start..=end` against a list of `len` elements using tail-relative
/// negative indices. Returns `None` when the range selects nothing.
pub fn resolve_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }
    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };
    if start > end || start >= len || end < 0 {
        return None;
    }
    Some((start as usize, end as usize))
}
