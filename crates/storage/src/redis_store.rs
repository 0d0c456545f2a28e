//! Redis-backed store
//!
//! One synchronous `redis::Connection` guarded by a `parking_lot::Mutex`.
//! Commands map one-to-one onto the `KeyValueStore` capability:
//!
//! | Capability       | Command   |
//! |------------------|-----------|
//! | `set`            | `SET`     |
//! | `get`            | `GET`     |
//! | `increment`      | `INCR`    |
//! | `append_to_list` | `RPUSH`   |
//! | `list_range`     | `LRANGE`  |
//! | `flush`          | `FLUSHDB` |
//!
//! `INCR` and `RPUSH` are atomic on the server, which is all the recorder
//! relies on. There is no timeout layer here; blocking behaviour is whatever
//! the connection does.

use callcache_core::{Error, KeyValueStore, Result, Value};
use parking_lot::Mutex;
use redis::{Client, Commands, Connection, RedisError};
use tracing::{debug, info};

/// Redis-based `KeyValueStore`.
pub struct RedisStore {
    conn: Mutex<Connection>,
    url: String,
}

impl RedisStore {
    /// Connect to the server at `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    ///
    /// [`Error::Connection`] if the URL is malformed or the server is unreachable.
    pub fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| Error::Connection {
            reason: format!("invalid Redis URL '{}': {}", url, e),
        })?;
        let conn = client.get_connection().map_err(|e| Error::Connection {
            reason: format!("cannot reach Redis at {}: {}", url, e),
        })?;

        info!(target: "callcache::storage", url, "connected to Redis");
        Ok(Self {
            conn: Mutex::new(conn),
            url: url.to_string(),
        })
    }

    /// URL this store is connected to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").field("url", &self.url).finish()
    }
}

impl KeyValueStore for RedisStore {
    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut conn = self.conn.lock();
        conn.set::<_, _, ()>(key, value.to_bytes())
            .map_err(|e| command_error("SET", key, "scalar", e))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.lock();
        conn.get::<_, Option<Vec<u8>>>(key)
            .map_err(|e| command_error("GET", key, "scalar", e))
    }

    fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.lock();
        conn.incr::<_, _, i64>(key, 1)
            .map_err(|e| command_error("INCR", key, "integer", e))
    }

    fn append_to_list(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.lock();
        conn.rpush::<_, _, ()>(key, value)
            .map_err(|e| command_error("RPUSH", key, "list", e))
    }

    fn list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.lock();
        conn.lrange::<_, Vec<Vec<u8>>>(key, start as isize, end as isize)
            .map_err(|e| command_error("LRANGE", key, "list", e))
    }

    fn flush(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        redis::cmd("FLUSHDB")
            .query::<()>(&mut *conn)
            .map_err(|e| Error::store(format!("Redis FLUSHDB failed: {}", e)))?;
        debug!(target: "callcache::storage", url = %self.url, "flushed Redis database");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

fn command_error(command: &str, key: &str, expected: &'static str, err: RedisError) -> Error {
    // INCR on a non-integer replies ERR, list commands on a scalar reply WRONGTYPE
    let wrong_type = err.code() == Some("WRONGTYPE")
        || (command == "INCR" && err.to_string().contains("not an integer"));
    if wrong_type {
        return Error::WrongType {
            key: key.to_string(),
            expected,
        };
    }
    Error::store(format!("Redis {} failed for '{}': {}", command, key, err))
}
