//! Invocation recording
//!
//! An [`Instrumented`] value wraps one operation with an ordered list of
//! [`InvocationHook`]s. Each invocation runs:
//!
//! 1. every hook's `before`, in registration order
//! 2. the wrapped call
//! 3. every hook's `after`, in registration order, only if the call succeeded
//!
//! Two hooks are provided, both keyed by the operation name:
//!
//! - [`CountCalls`]: `INCR <name>` before the call. Counts attempts, so a
//!   call that later fails is still counted.
//! - [`CallHistory`]: appends the rendered arguments to `<name>:inputs`
//!   before the call and the rendered result to `<name>:outputs` after it.
//!
//! The wrapper is transparent: the wrapped call sees the same arguments and
//! its result or error is returned unchanged. A failed call leaves one input
//! without a matching output.
//!
//! # Concurrency
//!
//! Each append is atomic, but the input and output of one call are two
//! separate appends. Two concurrent calls to the same operation can
//! therefore record `in A, in B, out B, out A`, and index pairing in the
//! history lists is only reliable for sequential callers.

use callcache_core::{CallArgs, Error, KeyValueStore, OperationName, Result};
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::{debug, warn};

/// Side effect attached to an instrumented operation.
pub trait InvocationHook: Send + Sync {
    /// Runs before the wrapped call.
    fn before(&self, _operation: &OperationName, _args: &CallArgs) -> Result<()> {
        Ok(())
    }

    /// Runs after the wrapped call returned successfully, with its rendered result.
    fn after(&self, _operation: &OperationName, _output: &str) -> Result<()> {
        Ok(())
    }
}

/// Counts every invocation under the operation's counter key.
pub struct CountCalls {
    store: Arc<dyn KeyValueStore>,
}

impl CountCalls {
    /// Count into `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl InvocationHook for CountCalls {
    fn before(&self, operation: &OperationName, _args: &CallArgs) -> Result<()> {
        let count = self.store.increment(operation.counter_key())?;
        debug!(target: "callcache::recorder", %operation, count, "call counted");
        Ok(())
    }
}

/// Records rendered inputs and outputs in two append-only lists.
pub struct CallHistory {
    store: Arc<dyn KeyValueStore>,
}

impl CallHistory {
    /// Record into `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl InvocationHook for CallHistory {
    fn before(&self, operation: &OperationName, args: &CallArgs) -> Result<()> {
        self.store
            .append_to_list(&operation.inputs_key(), &args.to_string())
    }

    fn after(&self, operation: &OperationName, output: &str) -> Result<()> {
        self.store.append_to_list(&operation.outputs_key(), output)
    }
}

/// An operation wrapped with recording hooks.
///
/// # Example
///
/// ```ignore
/// const SUM: OperationName = OperationName::from_static("Calculator.sum");
///
/// let sum = Instrumented::new(SUM)
///     .count_calls(store.clone())
///     .call_history(store.clone());
///
/// let total = sum.invoke(&CallArgs::single(2).with(3), || Ok::<_, Error>(2 + 3))?;
/// ```
pub struct Instrumented {
    operation: OperationName,
    hooks: Vec<Box<dyn InvocationHook>>,
}

impl Instrumented {
    /// Wrap `operation` with no hooks yet.
    pub fn new(operation: OperationName) -> Self {
        Self {
            operation,
            hooks: Vec::new(),
        }
    }

    /// Append a hook; hooks run in the order they were added.
    pub fn with_hook(mut self, hook: impl InvocationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Append a [`CountCalls`] hook.
    pub fn count_calls(self, store: Arc<dyn KeyValueStore>) -> Self {
        self.with_hook(CountCalls::new(store))
    }

    /// Append a [`CallHistory`] hook.
    pub fn call_history(self, store: Arc<dyn KeyValueStore>) -> Self {
        self.with_hook(CallHistory::new(store))
    }

    /// Name the hooks record under.
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// Number of attached hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Run `call` with every hook around it.
    ///
    /// Hook failures are store failures and surface as `E::from(Error)`.
    /// A failure of `call` itself skips the `after` hooks and is returned as is.
    pub fn invoke<R, E, F>(&self, args: &CallArgs, call: F) -> std::result::Result<R, E>
    where
        R: Display,
        E: From<Error>,
        F: FnOnce() -> std::result::Result<R, E>,
    {
        for hook in &self.hooks {
            hook.before(&self.operation, args)?;
        }

        let result = match call() {
            Ok(result) => result,
            Err(err) => {
                if !self.hooks.is_empty() {
                    warn!(
                        target: "callcache::recorder",
                        operation = %self.operation,
                        %args,
                        "instrumented call failed; output not recorded"
                    );
                }
                return Err(err);
            }
        };

        if !self.hooks.is_empty() {
            let output = result.to_string();
            for hook in &self.hooks {
                hook.after(&self.operation, &output)?;
            }
        }
        Ok(result)
    }
}

impl fmt::Debug for Instrumented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("operation", &self.operation)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
