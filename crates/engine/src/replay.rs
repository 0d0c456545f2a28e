//! Call history replay
//!
//! Reads an operation's input and output lists back and renders them:
//!
//! ```text
//! Cache.store was called 3 times:
//! Cache.store(*('first',)) -> 0b6e...
//! Cache.store(*('second',)) -> 5f1c...
//! Cache.store(*('third',)) -> 9a27...
//! ```
//!
//! The count is the number of recorded inputs; detail lines stop at the
//! shorter of the two lists, so a failed call is counted but not listed.
//! Replay only reads; it never touches counters or history.

use callcache_core::{KeyValueStore, OperationName, Result};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// One completed call as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall<'a> {
    /// Rendered argument tuple, e.g. `('first',)`
    pub args: &'a str,
    /// Rendered result
    pub output: &'a str,
}

/// Snapshot of one operation's call history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLog {
    operation: OperationName,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl CallLog {
    /// Build from already decoded history lists.
    pub fn new(operation: OperationName, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self {
            operation,
            inputs,
            outputs,
        }
    }

    /// Operation this log belongs to.
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// Number of recorded invocations (inputs).
    pub fn total_calls(&self) -> usize {
        self.inputs.len()
    }

    /// Number of invocations with a recorded output.
    pub fn completed_calls(&self) -> usize {
        self.inputs.len().min(self.outputs.len())
    }

    /// Completed calls in recording order.
    pub fn calls(&self) -> impl Iterator<Item = RecordedCall<'_>> {
        self.inputs
            .iter()
            .zip(self.outputs.iter())
            .map(|(args, output)| RecordedCall { args, output })
    }

    /// Inputs that have no output yet: calls that failed or are still running.
    pub fn unmatched_inputs(&self) -> &[String] {
        &self.inputs[self.completed_calls()..]
    }

    /// The rendered report, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(1 + self.completed_calls());
        lines.push(format!(
            "{} was called {} times:",
            self.operation,
            self.total_calls()
        ));
        lines.extend(
            self.calls()
                .map(|call| format!("{}(*{}) -> {}", self.operation, call.args, call.output)),
        );
        lines
    }
}

impl fmt::Display for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Reads call history back out of the store.
#[derive(Clone)]
pub struct ReplayReporter {
    store: Arc<dyn KeyValueStore>,
}

impl ReplayReporter {
    /// Report on history kept in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the full history of `operation`.
    ///
    /// An operation that was never called yields an empty log.
    pub fn load(&self, operation: &OperationName) -> Result<CallLog> {
        let inputs = self.read_list(&operation.inputs_key())?;
        let outputs = self.read_list(&operation.outputs_key())?;
        debug!(
            target: "callcache::replay",
            %operation,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "history loaded"
        );
        Ok(CallLog::new(operation.clone(), inputs, outputs))
    }

    /// Load the history of `operation` and write the report to `out`.
    pub fn replay(&self, operation: &OperationName, out: &mut impl Write) -> Result<CallLog> {
        let log = self.load(operation)?;
        for line in log.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(log)
    }

    fn read_list(&self, key: &str) -> Result<Vec<String>> {
        self.store
            .list_range(key, 0, -1)?
            .into_iter()
            .map(|entry| String::from_utf8(entry).map_err(Into::into))
            .collect()
    }
}

impl fmt::Debug for ReplayReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayReporter")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}
