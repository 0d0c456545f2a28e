//! Converters from raw stored bytes to typed values.
//!
//! Each takes ownership of the bytes. `to_text` reports bytes that are not
//! UTF-8 as `Error::Decode`; the numeric converters report any content that
//! is not a number, including non-UTF-8 bytes, as `Error::Parse`.

use callcache_core::{Error, Result};
use std::str::FromStr;

/// Decode UTF-8 text.
pub fn to_text(bytes: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(bytes)?)
}

/// Parse a base-10 signed integer, ignoring surrounding whitespace.
///
/// The range is that of `i64`; anything outside it is a parse error.
pub fn to_integer(bytes: Vec<u8>) -> Result<i64> {
    parse_number(bytes, "integer")
}

/// Parse a float (`inf` and `nan` accepted), ignoring surrounding whitespace.
pub fn to_float(bytes: Vec<u8>) -> Result<f64> {
    parse_number(bytes, "float")
}

fn parse_number<T: FromStr>(bytes: Vec<u8>, target: &'static str) -> Result<T> {
    let text = String::from_utf8(bytes).map_err(|err| Error::Parse {
        input: String::from_utf8_lossy(err.as_bytes()).into_owned(),
        target,
    })?;
    text.trim()
        .parse()
        .map_err(|_| Error::Parse { input: text, target })
}
