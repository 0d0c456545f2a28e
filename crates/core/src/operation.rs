//! Operation names
//!
//! An `OperationName` namespaces everything recorded for one instrumented
//! operation:
//!
//! - `<name>`          call counter
//! - `<name>:inputs`   rendered arguments, one entry per call
//! - `<name>:outputs`  rendered results, one entry per completed call
//!
//! Names are declared up front by the code that registers the operation.
//! They may not be empty and may not contain `:`, so the keys of two
//! different operations can never collide.

use crate::{Error, Result};
use std::borrow::Cow;
use std::fmt;

const INPUTS_SUFFIX: &str = ":inputs";
const OUTPUTS_SUFFIX: &str = ":outputs";

/// Stable identifier of an instrumented operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationName(Cow<'static, str>);

impl OperationName {
    /// Declare a name at compile time.
    ///
    /// Used in a `const`, an invalid name is a compile error.
    ///
    /// ```
    /// use callcache_core::OperationName;
    ///
    /// const STORE: OperationName = OperationName::from_static("Cache.store");
    /// assert_eq!(STORE.inputs_key(), "Cache.store:inputs");
    /// ```
    pub const fn from_static(name: &'static str) -> Self {
        assert!(
            is_valid(name),
            "operation name must be non-empty and must not contain ':'"
        );
        Self(Cow::Borrowed(name))
    }

    /// Build a name at runtime, rejecting names that would break key namespacing.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidOperationName {
                name,
                reason: "name is empty",
            });
        }
        if name.contains(':') {
            return Err(Error::InvalidOperationName {
                name,
                reason: "name contains ':'",
            });
        }
        Ok(Self(Cow::Owned(name)))
    }

    /// The name itself.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the call counter.
    pub fn counter_key(&self) -> &str {
        &self.0
    }

    /// Key of the input history list.
    pub fn inputs_key(&self) -> String {
        format!("{}{}", self.0, INPUTS_SUFFIX)
    }

    /// Key of the output history list.
    pub fn outputs_key(&self) -> String {
        format!("{}{}", self.0, OUTPUTS_SUFFIX)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OperationName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

const fn is_valid(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b':' {
            return false;
        }
        i += 1;
    }
    true
}
