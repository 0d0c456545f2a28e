//! Error types for callcache.
//!
//! One taxonomy is shared by the store adapters, the cache and the
//! recorder. An absent key is never an error; it is a `None` result.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type for callcache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the store or converting values.
#[derive(Debug, Error)]
pub enum Error {
    /// The store could not be reached when opening a handle.
    #[error("connection error: {reason}")]
    Connection {
        /// What went wrong
        reason: String,
    },

    /// A store command failed after the connection was established.
    #[error("store error: {reason}")]
    Store {
        /// What went wrong
        reason: String,
    },

    /// The key holds a value of a different kind than the command expects.
    #[error("wrong type for key '{key}': expected {expected}")]
    WrongType {
        /// Offending key
        key: String,
        /// Kind the command needed
        expected: &'static str,
    },

    /// Stored bytes are not valid UTF-8.
    #[error("decode error: {source}")]
    Decode {
        /// Underlying UTF-8 error
        #[from]
        source: FromUtf8Error,
    },

    /// Stored text is not a valid number of the requested kind.
    #[error("parse error: cannot parse '{input}' as {target}")]
    Parse {
        /// The text that failed to parse
        input: String,
        /// Target type name
        target: &'static str,
    },

    /// A caller-supplied converter rejected the stored bytes.
    #[error("conversion error: {reason}")]
    Conversion {
        /// What went wrong
        reason: String,
    },

    /// An operation name cannot be used as a key namespace.
    #[error("invalid operation name '{name}': {reason}")]
    InvalidOperationName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },

    /// Writing a report failed.
    #[error("io error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a `Conversion` error from anything displayable.
    pub fn conversion(reason: impl std::fmt::Display) -> Self {
        Error::Conversion {
            reason: reason.to_string(),
        }
    }

    /// Build a `Store` error from anything displayable.
    pub fn store(reason: impl std::fmt::Display) -> Self {
        Error::Store {
            reason: reason.to_string(),
        }
    }

    /// True for failures that happened while reading stored bytes back.
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            Error::Decode { .. } | Error::Parse { .. } | Error::Conversion { .. }
        )
    }
}
