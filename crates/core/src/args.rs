//! Positional arguments of an instrumented call
//!
//! `CallArgs` renders as a tuple literal so history entries read like the
//! call that produced them: `()`, `('first',)`, `('a', 42)`. The rendering
//! depends only on the values, never on how they were passed in.

use crate::Value;
use std::fmt;

/// Positional arguments of one invocation, excluding the receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs(Vec<Value>);

impl CallArgs {
    /// No arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single argument.
    pub fn single(value: impl Into<Value>) -> Self {
        Self(vec![value.into()])
    }

    /// Append another argument.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    /// The arguments in call order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the call took no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl fmt::Display for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&value.literal())?;
        }
        // one-element tuples keep the trailing comma
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}
