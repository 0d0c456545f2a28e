//! Public types for the callcache API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Values and call arguments
// ============================================================================

pub use callcache_core::CallArgs;
pub use callcache_core::Value;

// Operation naming (counter / history key namespace)
pub use callcache_core::OperationName;

// Errors
pub use callcache_core::{Error, Result};

// ============================================================================
// Store capability and configuration
// ============================================================================

pub use callcache_core::KeyValueStore;
pub use callcache_storage::{Backend, MemoryStore, StoreConfig, DEFAULT_REDIS_URL};

#[cfg(feature = "redis-backend")]
pub use callcache_storage::RedisStore;

// ============================================================================
// Cache, recording and replay
// ============================================================================

pub use callcache_engine::{Cache, STORE_OPERATION};
pub use callcache_engine::{CallHistory, CountCalls, Instrumented, InvocationHook};
pub use callcache_engine::{CallLog, RecordedCall, ReplayReporter};
