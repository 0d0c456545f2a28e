//! Engine layer for callcache
//!
//! - `Cache`: store scalars under generated keys, read them back typed
//! - `Instrumented`: wrap an operation with call counting and call history
//! - `ReplayReporter`: render an operation's recorded call history
//!
//! Everything talks to the backing store through `Arc<dyn KeyValueStore>`;
//! the recorder and the reporter find each other's data only through the
//! key naming of `OperationName`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod convert;
pub mod recorder;
pub mod replay;

pub use cache::{Cache, STORE_OPERATION};
pub use recorder::{CallHistory, CountCalls, Instrumented, InvocationHook};
pub use replay::{CallLog, RecordedCall, ReplayReporter};
