//! Store configuration.
//!
//! Selects the backend and whether the store is flushed when a cache opens
//! it. Three sources, all producing a [`StoreConfig`]:
//!
//! - builder calls (`StoreConfig::new().redis(url)`)
//! - a TOML file:
//!
//! ```toml
//! backend = "redis"                      # "memory" (default) | "redis"
//! redis_url = "redis://127.0.0.1:6379"
//! reset_on_open = false
//! ```
//!
//! - environment variables:
//!   - `CALLCACHE_BACKEND`: `memory` | `redis` (default `memory`)
//!   - `CALLCACHE_REDIS_URL`: server URL (default `redis://127.0.0.1:6379`)
//!   - `CALLCACHE_RESET_ON_OPEN`: `1` / `true` to flush on open

use callcache_core::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Redis URL used when none is configured.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Environment variable selecting the backend.
pub const ENV_BACKEND: &str = "CALLCACHE_BACKEND";
/// Environment variable holding the Redis URL.
pub const ENV_REDIS_URL: &str = "CALLCACHE_REDIS_URL";
/// Environment variable enabling flush-on-open.
pub const ENV_RESET_ON_OPEN: &str = "CALLCACHE_RESET_ON_OPEN";

/// Which store to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Backend {
    /// In-process map (default, always available)
    #[default]
    Memory,
    /// Redis server (requires the `redis-backend` feature)
    Redis {
        /// Server URL
        url: String,
    },
}

impl Backend {
    /// Short backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory => "memory",
            Backend::Redis { .. } => "redis",
        }
    }
}

/// Options for opening a store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreConfig {
    /// Backend selection.
    pub backend: Backend,
    /// Flush the whole store when a cache opens it. Off unless asked for.
    pub reset_on_open: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    backend: Option<String>,
    redis_url: Option<String>,
    reset_on_open: Option<bool>,
}

impl StoreConfig {
    /// Default settings: in-memory backend, no reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Use a Redis server at `url`.
    pub fn redis(self, url: impl Into<String>) -> Self {
        self.backend(Backend::Redis { url: url.into() })
    }

    /// Flush the store when a cache opens it.
    pub fn reset_on_open(mut self, reset: bool) -> Self {
        self.reset_on_open = reset;
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(input).map_err(|e| Error::Config {
            reason: format!("invalid config: {}", e),
        })?;
        Ok(Self {
            backend: backend_from_parts(file.backend.as_deref(), file.redis_url)?,
            reset_on_open: file.reset_on_open.unwrap_or(false),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&input)
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = lookup(ENV_BACKEND);
        let reset_on_open = match lookup(ENV_RESET_ON_OPEN) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or_else(|| Error::Config {
                reason: format!("{} must be true/false/1/0, got '{}'", ENV_RESET_ON_OPEN, raw),
            })?,
        };
        Ok(Self {
            backend: backend_from_parts(backend.as_deref(), lookup(ENV_REDIS_URL))?,
            reset_on_open,
        })
    }
}

fn backend_from_parts(name: Option<&str>, redis_url: Option<String>) -> Result<Backend> {
    match name.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("memory") | Some("in-memory") => Ok(Backend::Memory),
        Some("redis") => Ok(Backend::Redis {
            url: redis_url.unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
        }),
        Some(other) => Err(Error::Config {
            reason: format!("unknown backend '{}' (expected 'memory' or 'redis')", other),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
