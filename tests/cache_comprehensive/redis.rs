//! Scenarios against a live Redis on `127.0.0.1:6379`.
//!
//! Each test flushes the selected database on open, so point them at a
//! throwaway server only.

use callcache::{Cache, StoreConfig, STORE_OPERATION, DEFAULT_REDIS_URL};

fn redis_cache() -> Cache {
    let config = StoreConfig::new()
        .redis(DEFAULT_REDIS_URL)
        .reset_on_open(true);
    Cache::open(&config).expect("redis server on 127.0.0.1:6379")
}

#[test]
#[ignore = "requires a running Redis server"]
fn test_redis_round_trips() {
    let cache = redis_cache();

    let key = cache.store(b"hello").unwrap();
    assert_eq!(cache.retrieve(&key).unwrap(), Some(b"hello".to_vec()));

    let key = cache.store("42").unwrap();
    assert_eq!(cache.retrieve_integer(&key).unwrap(), Some(42));
    assert_eq!(cache.retrieve_text(&key).unwrap().as_deref(), Some("42"));

    assert_eq!(cache.retrieve("nonexistent-key").unwrap(), None);
}

#[test]
#[ignore = "requires a running Redis server"]
fn test_redis_counts_and_replays() {
    let cache = redis_cache();
    let k1 = cache.store("first").unwrap();
    let k2 = cache.store("second").unwrap();
    let k3 = cache.store("third").unwrap();

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 3);

    let mut out = Vec::new();
    cache.replay_reporter().replay(&STORE_OPERATION, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "Cache.store was called 3 times:\n\
             Cache.store(*('first',)) -> {}\n\
             Cache.store(*('second',)) -> {}\n\
             Cache.store(*('third',)) -> {}\n",
            k1, k2, k3
        )
    );
}

#[test]
fn test_unreachable_redis_is_connection_error() {
    let config = StoreConfig::new().redis("redis://127.0.0.1:1/");
    let err = Cache::open(&config).unwrap_err();
    assert!(matches!(err, callcache::Error::Connection { .. }));
}
