//! Parallel callers sharing one cache.

use crate::test_utils::{memory_cache_with_store, read_list};
use callcache::STORE_OPERATION;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const STORES_PER_THREAD: usize = 250;

#[test]
fn test_parallel_stores_count_every_call() {
    let (cache, store) = memory_cache_with_store();
    let cache = Arc::new(cache);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                (0..STORES_PER_THREAD)
                    .map(|i| cache.store(format!("t{}-{}", t, i)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let keys: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let total = THREADS * STORES_PER_THREAD;

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), total as i64);
    assert_eq!(read_list(&store, &STORE_OPERATION.inputs_key()).len(), total);
    assert_eq!(read_list(&store, &STORE_OPERATION.outputs_key()).len(), total);

    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(unique.len(), total);
}

#[test]
fn test_parallel_history_holds_every_call_once() {
    let (cache, store) = memory_cache_with_store();
    let cache = Arc::new(cache);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..STORES_PER_THREAD {
                    cache.store(format!("t{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // entries may interleave across threads, but none is lost or duplicated
    let inputs: HashSet<String> = read_list(&store, &STORE_OPERATION.inputs_key())
        .into_iter()
        .collect();
    assert_eq!(inputs.len(), THREADS * STORES_PER_THREAD);
    assert!(inputs.contains("('t0-0',)"));
    assert!(inputs.contains(&format!("('t{}-{}',)", THREADS - 1, STORES_PER_THREAD - 1)));
}

#[test]
fn test_readers_alongside_writers() {
    let (cache, _store) = memory_cache_with_store();
    let cache = Arc::new(cache);
    let seed = cache.store("stable").unwrap();

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..500 {
                cache.store(i).unwrap();
            }
        })
    };
    let reader = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for _ in 0..500 {
                assert_eq!(cache.retrieve_text(&seed).unwrap().as_deref(), Some("stable"));
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 501);
}
