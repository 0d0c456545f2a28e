//! Core types for callcache
//!
//! This crate defines the vocabulary shared by every other crate:
//! - `Value`: scalar payloads written to the store (text, bytes, int, float)
//! - `CallArgs`: the positional arguments of one instrumented invocation
//! - `OperationName`: namespace prefix for counters and history lists
//! - `Error` / `Result`: the error taxonomy
//! - `KeyValueStore`: the capability the backing store must provide

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod error;
pub mod operation;
pub mod repr;
pub mod store;
pub mod value;

pub use args::CallArgs;
pub use error::{Error, Result};
pub use operation::OperationName;
pub use store::KeyValueStore;
pub use value::Value;
