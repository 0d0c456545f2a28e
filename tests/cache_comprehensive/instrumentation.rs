//! Call counting and history recorded by `Cache::store`.

use crate::test_utils::{memory_cache_with_store, read_list};
use callcache::{
    CallArgs, Error, Instrumented, KeyValueStore, MemoryStore, OperationName, STORE_OPERATION,
};
use std::sync::Arc;

#[test]
fn test_store_operation_keys() {
    assert_eq!(STORE_OPERATION.as_str(), "Cache.store");
    assert_eq!(STORE_OPERATION.counter_key(), "Cache.store");
    assert_eq!(STORE_OPERATION.inputs_key(), "Cache.store:inputs");
    assert_eq!(STORE_OPERATION.outputs_key(), "Cache.store:outputs");
}

#[test]
fn test_k_sequential_stores() {
    let (cache, store) = memory_cache_with_store();
    let keys: Vec<String> = (0..5).map(|i| cache.store(i).unwrap()).collect();

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 5);
    assert_eq!(store.get("Cache.store").unwrap(), Some(b"5".to_vec()));

    let inputs = read_list(&store, "Cache.store:inputs");
    let outputs = read_list(&store, "Cache.store:outputs");
    assert_eq!(inputs, vec!["(0,)", "(1,)", "(2,)", "(3,)", "(4,)"]);
    assert_eq!(outputs, keys);
}

#[test]
fn test_history_renders_each_kind() {
    let (cache, store) = memory_cache_with_store();
    cache.store("text").unwrap();
    cache.store(b"raw").unwrap();
    cache.store(7).unwrap();
    cache.store(0.25).unwrap();

    assert_eq!(
        read_list(&store, &STORE_OPERATION.inputs_key()),
        vec!["('text',)", "(b'raw',)", "(7,)", "(0.25,)"]
    );
}

#[test]
fn test_retrieval_is_not_instrumented() {
    let (cache, store) = memory_cache_with_store();
    let key = cache.store("x").unwrap();
    cache.retrieve(&key).unwrap();
    cache.retrieve_text(&key).unwrap();

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 1);
    assert_eq!(read_list(&store, &STORE_OPERATION.inputs_key()).len(), 1);
}

#[test]
fn test_two_caches_on_one_store_share_history() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let a = callcache::Cache::new(store.clone());
    let b = callcache::Cache::new(store.clone());

    a.store("from a").unwrap();
    b.store("from b").unwrap();

    assert_eq!(a.call_count(&STORE_OPERATION).unwrap(), 2);
    assert_eq!(
        read_list(&store, &STORE_OPERATION.inputs_key()),
        vec!["('from a',)", "('from b',)"]
    );
}

#[test]
fn test_custom_operation_is_namespaced_separately() {
    const DOUBLE: OperationName = OperationName::from_static("Math.double");

    let (cache, store) = memory_cache_with_store();
    let double = Instrumented::new(DOUBLE)
        .count_calls(store.clone())
        .call_history(store.clone());

    let result: Result<i64, Error> = double.invoke(&CallArgs::single(21), || Ok(42));
    assert_eq!(result.unwrap(), 42);
    cache.store("unrelated").unwrap();

    assert_eq!(cache.call_count(&DOUBLE).unwrap(), 1);
    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 1);
    assert_eq!(read_list(&store, "Math.double:inputs"), vec!["(21,)"]);
    assert_eq!(read_list(&store, "Math.double:outputs"), vec!["42"]);
}

#[test]
fn test_failing_store_write_propagates_and_leaves_unmatched_input() {
    let (cache, store) = memory_cache_with_store();
    // an outputs key holding a scalar makes the after-hook fail
    cache.store("ok").unwrap();
    store
        .set(&STORE_OPERATION.outputs_key(), &callcache::Value::from("scalar"))
        .unwrap();

    let err = cache.store("broken").unwrap_err();
    assert!(matches!(err, Error::WrongType { .. }));

    assert_eq!(cache.call_count(&STORE_OPERATION).unwrap(), 2);
    assert_eq!(
        read_list(&store, &STORE_OPERATION.inputs_key()),
        vec!["('ok',)", "('broken',)"]
    );
}

#[test]
fn test_failed_call_counts_but_records_no_output() {
    const PARSE: OperationName = OperationName::from_static("Config.parse");

    let (cache, store) = memory_cache_with_store();
    let parse = Instrumented::new(PARSE)
        .count_calls(store.clone())
        .call_history(store.clone());

    let parse_port = |raw: &str| -> Result<i64, Error> {
        parse.invoke(&CallArgs::single(raw), || {
            raw.parse::<i64>().map_err(|_| Error::Parse {
                input: raw.to_string(),
                target: "integer",
            })
        })
    };

    assert_eq!(parse_port("8080").unwrap(), 8080);
    assert!(parse_port("eighty").is_err());

    assert_eq!(cache.call_count(&PARSE).unwrap(), 2);
    assert_eq!(
        read_list(&store, &PARSE.inputs_key()),
        vec!["('8080',)", "('eighty',)"]
    );
    assert_eq!(read_list(&store, &PARSE.outputs_key()), vec!["8080"]);
}
