//! Wire payloads for the string operations.
//!
//! These are the JSON bodies exchanged over HTTP. Request structs default a
//! missing `s` to the empty string and ignore unknown fields, so a body of
//! `{}` reaches the service as an empty input rather than failing to decode.
//! The field also matches as `S`, and an explicit `null` reads as empty.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Uppercase
// ---------------------------------------------------------------------------

/// Body of `POST /uppercase`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UppercaseRequest {
    #[serde(default, alias = "S", deserialize_with = "null_as_empty")]
    pub s: String,
}

/// Result of `uppercase`. `err` carries the domain error description and is
/// omitted from the wire form when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UppercaseResponse {
    pub v: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub err: String,
}

impl UppercaseResponse {
    /// Whether this response carries a domain error.
    #[must_use]
    pub fn is_err(&self) -> bool {
        !self.err.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Count
// ---------------------------------------------------------------------------

/// Body of `POST /count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    #[serde(default, alias = "S", deserialize_with = "null_as_empty")]
    pub s: String,
}

/// Result of `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub v: usize,
}
