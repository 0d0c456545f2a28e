//! Cache Comprehensive Test Suite
//!
//! End-to-end checks of the public `callcache` API against the in-memory
//! backend. Redis-backed variants are `#[ignore]`d and need a local server.
//!
//! ## Test Groups
//!
//! - **retrieval**: round trips and conversion-on-read
//! - **instrumentation**: call counting and history through `Cache::store`
//! - **replay**: rendered call logs
//! - **concurrency**: atomicity guarantees under parallel callers
//! - **redis**: the same scenarios against a live Redis
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test cache_comprehensive
//! cargo test --test cache_comprehensive -- --ignored   # with Redis on :6379
//! ```

mod test_utils;

mod concurrency;
mod instrumentation;
#[cfg(feature = "redis-backend")]
mod redis;
mod replay;
