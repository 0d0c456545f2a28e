//! Scalar values accepted by the cache
//!
//! A `Value` is what callers hand to `Cache::store`. The store only keeps
//! bytes, so every variant has a native byte encoding:
//!
//! | Variant | Stored as |
//! |---------|-----------|
//! | `Text`  | UTF-8 bytes |
//! | `Bytes` | verbatim |
//! | `Int`   | base-10 ASCII (`"42"`) |
//! | `Float` | shortest round-trip form (`"2.75"`, `"1e+16"`) |

use crate::repr;
use std::fmt;

/// A scalar value that can be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Text(String),
    /// Arbitrary bytes
    Bytes(Vec<u8>),
    /// Signed 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
}

impl Value {
    /// The bytes this value is stored as.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.as_bytes().to_vec(),
            Value::Bytes(b) => b.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(f) => repr::float_literal(*f).into_bytes(),
        }
    }

    /// Literal rendering used in call history (`'text'`, `b'raw'`, `42`).
    pub fn literal(&self) -> String {
        match self {
            Value::Text(s) => repr::text_literal(s),
            Value::Bytes(b) => repr::bytes_literal(b),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => repr::float_literal(*f),
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }
}

/// Plain textual form: text as-is, everything else as its literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            other => f.write_str(&other.literal()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
