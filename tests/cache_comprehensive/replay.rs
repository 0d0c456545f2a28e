//! Rendered call logs over `Cache::store` history.

use crate::test_utils::{memory_cache, memory_cache_with_store};
use callcache::{CallArgs, Error, Instrumented, OperationName, STORE_OPERATION};

fn replay_to_string(cache: &callcache::Cache, operation: &OperationName) -> String {
    let mut out = Vec::new();
    cache.replay_reporter().replay(operation, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_three_stores_replay() {
    let cache = memory_cache();
    let k1 = cache.store("first").unwrap();
    let k2 = cache.store("second").unwrap();
    let k3 = cache.store("third").unwrap();

    let report = replay_to_string(&cache, &STORE_OPERATION);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Cache.store was called 3 times:".to_string(),
            format!("Cache.store(*('first',)) -> {}", k1),
            format!("Cache.store(*('second',)) -> {}", k2),
            format!("Cache.store(*('third',)) -> {}", k3),
        ]
    );
}

#[test]
fn test_replay_without_history() {
    let cache = memory_cache();
    assert_eq!(
        replay_to_string(&cache, &STORE_OPERATION),
        "Cache.store was called 0 times:\n"
    );
}

#[test]
fn test_replay_of_bytes_and_numbers() {
    let cache = memory_cache();
    let k1 = cache.store(b"hello").unwrap();
    let k2 = cache.store(1e16).unwrap();

    let log = cache.replay_reporter().load(&STORE_OPERATION).unwrap();
    let calls: Vec<(String, String)> = log
        .calls()
        .map(|call| (call.args.to_string(), call.output.to_string()))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("(b'hello',)".to_string(), k1),
            ("(1e+16,)".to_string(), k2),
        ]
    );
}

#[test]
fn test_line_count_is_one_plus_completed_calls() {
    const FETCH: OperationName = OperationName::from_static("Remote.fetch");

    let (cache, store) = memory_cache_with_store();
    let fetch = Instrumented::new(FETCH)
        .count_calls(store.clone())
        .call_history(store.clone());

    for attempt in 0..4 {
        let _: Result<String, Error> = fetch.invoke(&CallArgs::single(attempt), || {
            if attempt % 2 == 0 {
                Ok(format!("payload-{}", attempt))
            } else {
                Err(Error::store("timed out"))
            }
        });
    }

    let log = cache.replay_reporter().load(&FETCH).unwrap();
    assert_eq!(log.total_calls(), 4);
    assert_eq!(log.completed_calls(), 2);
    assert_eq!(log.lines().len(), 3);
    assert_eq!(log.lines()[0], "Remote.fetch was called 4 times:");
}

#[test]
fn test_replay_is_read_only() {
    let cache = memory_cache();
    cache.store("only").unwrap();

    replay_to_string(&cache, &STORE_OPERATION);
    replay_to_string(&cache, &STORE_OPERATION);

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 1);
    let log = cache.replay_reporter().load(&STORE_OPERATION).unwrap();
    assert_eq!(log.total_calls(), 1);
}

#[test]
fn test_reset_clears_history() {
    let cache = memory_cache();
    cache.store("gone").unwrap();
    cache.reset_all().unwrap();

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 0);
    assert_eq!(
        replay_to_string(&cache, &STORE_OPERATION),
        "Cache.store was called 0 times:\n"
    );
}
