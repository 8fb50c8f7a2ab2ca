pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::error::{Error, ErrorKind, Location};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a full QCL document and returns the reconciled JSON value.
pub fn parse_str(input: &str) -> Result<Value> {
    let document = parser::parse(input)?;
    eval::eval_document(&document)
}

/// Parses a QCL document and deserializes the result into `T`.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    let value = parse_str(input)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    let text =
        std::str::from_utf8(input).map_err(|err| Error::deserialize(format!("invalid utf-8: {err}")))?;
    from_str(text)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(format!("read failed: {err}")))?;
    from_str(&buf)
}

/// Checks that `input` is a well-formed QCL document, discarding the value.
pub fn validate_str(input: &str) -> Result<()> {
    parse_str(input).map(|_| ())
}
